pub mod convert;
pub mod currencies;
pub mod detect;
pub mod interactive;
pub mod notify;
pub mod setup;
pub mod ui;
