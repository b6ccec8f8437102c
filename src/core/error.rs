//! Errors raised by rate sources, location detection and conversion.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Transport failures, non-2xx responses and malformed payloads from any
    /// external service. The message is what the user gets to see.
    #[error("External call failed: {0}")]
    ExternalCall(String),

    /// The rate table has no factor for the requested currency.
    #[error("Currency unavailable: {0}")]
    CurrencyUnavailable(String),
}

// The rates URL embeds the API key, so it never ends up in a message.
impl From<reqwest::Error> for ConversionError {
    fn from(err: reqwest::Error) -> Self {
        ConversionError::ExternalCall(err.without_url().to_string())
    }
}

pub type Result<T, E = ConversionError> = std::result::Result<T, E>;
