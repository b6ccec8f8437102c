use crate::core::error::{ConversionError, Result};
use crate::core::location::LocationProvider;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://ipapi.co";

/// IP geolocation lookup against ipapi.co.
pub struct IpApiProvider {
    base_url: String,
}

impl IpApiProvider {
    pub fn new(base_url: &str) -> Self {
        IpApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    currency: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

#[async_trait]
impl LocationProvider for IpApiProvider {
    #[instrument(name = "IpApiLookup", skip(self))]
    async fn detect_currency(&self) -> Result<String> {
        let url = format!("{}/json/", self.base_url);
        debug!("Requesting location from {}", url);

        let client = reqwest::Client::builder().user_agent("xconv/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| ConversionError::ExternalCall(format!("Request error: {e}")))?;

        if !response.status().is_success() {
            return Err(ConversionError::ExternalCall(format!(
                "HTTP error: {} for location lookup",
                response.status()
            )));
        }

        let data: IpApiResponse = response.json().await.map_err(|e| {
            ConversionError::ExternalCall(format!("Failed to parse location response: {e}"))
        })?;

        if data.error {
            return Err(ConversionError::ExternalCall(format!(
                "Location lookup rejected: {}",
                data.reason.as_deref().unwrap_or("unknown")
            )));
        }

        data.currency
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ConversionError::ExternalCall("No currency in location response".into()))
    }
}
