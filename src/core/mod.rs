//! Core conversion logic and provider abstractions

pub mod config;
pub mod conversion;
pub mod error;
pub mod flag;
pub mod location;
pub mod log;
pub mod notify;
pub mod presenter;
pub mod rates;

// Re-export main types for cleaner imports
pub use conversion::{ConversionMode, ConversionRequest, ConversionResult, Selection};
pub use error::ConversionError;
pub use location::LocationProvider;
pub use notify::Notifier;
pub use presenter::{Phase, Presenter, PresenterOptions, PresenterView};
pub use rates::{RateProvider, RateTable};
