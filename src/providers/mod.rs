pub mod exchange_rate_api;
pub mod ipapi;

pub use exchange_rate_api::ExchangeRateApiProvider;
pub use ipapi::IpApiProvider;
