use crate::core::error::{ConversionError, Result};
use crate::core::rates::{RateProvider, RateTable};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://v6.exchangerate-api.com";
pub const API_KEY_ENV: &str = "EXCHANGE_RATE_API_KEY";

/// Latest rates from exchangerate-api.com, always relative to one base.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
    base_currency: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str, base_currency: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            base_currency: base_currency.to_uppercase(),
        }
    }

    /// Uses the configured key, else `EXCHANGE_RATE_API_KEY`. A missing key
    /// is left for the provider to reject.
    pub fn from_env(base_url: &str, api_key: Option<&str>, base_currency: &str) -> Self {
        let api_key = api_key
            .map(str::to_string)
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .unwrap_or_default();
        if api_key.is_empty() {
            debug!("No exchange rate API key configured");
        }
        Self::new(base_url, &api_key, base_currency)
    }

    fn url(&self) -> String {
        format!(
            "{}/v6/{}/latest/{}",
            self.base_url, self.api_key, self.base_currency
        )
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    time_last_update_unix: Option<i64>,
    conversion_rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    #[instrument(
        name = "ExchangeRateFetch",
        skip(self),
        fields(base = %self.base_currency)
    )]
    async fn fetch_rates(&self) -> Result<RateTable> {
        // The key is part of the path, so only the host is logged.
        debug!("Requesting latest rates from {}", self.base_url);

        let client = reqwest::Client::builder().user_agent("xconv/1.0").build()?;
        let response = client.get(self.url()).send().await.map_err(|e| {
            ConversionError::ExternalCall(format!(
                "Request error: {} for base currency: {}",
                e.without_url(),
                self.base_currency
            ))
        })?;

        if !response.status().is_success() {
            return Err(ConversionError::ExternalCall(format!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                self.base_currency
            )));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            ConversionError::ExternalCall(format!(
                "Failed to parse JSON response for {}: {}",
                self.base_currency, e
            ))
        })?;

        if data.result.as_deref() == Some("error") {
            return Err(ConversionError::ExternalCall(format!(
                "Provider error: {}",
                data.error_type.as_deref().unwrap_or("unknown")
            )));
        }

        let rates = data.conversion_rates.ok_or_else(|| {
            ConversionError::ExternalCall(format!(
                "No conversion rates found for base currency: {}",
                self.base_currency
            ))
        })?;

        let base = data.base_code.unwrap_or_else(|| self.base_currency.clone());
        let last_updated = data
            .time_last_update_unix
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single());

        let table = RateTable::new(&base, rates).with_last_updated(last_updated);
        debug!(count = table.len(), "Received exchange rates");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v6/test-key/latest/USD"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "result": "success",
            "base_code": "USD",
            "time_last_update_unix": 1700000000,
            "conversion_rates": {
                "USD": 1,
                "EUR": 0.92,
                "INR": 83.12
            }
        }"#;
        let mock_server = create_mock_server(200, mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key", "USD");

        let table = provider.fetch_rates().await.expect("Failed to fetch rates");
        assert_eq!(table.base, "USD");
        assert_eq!(table.currencies(), vec!["EUR", "INR", "USD"]);
        assert_eq!(table.rate("EUR"), Some(0.92));
        assert_eq!(
            table.last_updated.map(|d| d.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[tokio::test]
    async fn test_provider_error_payload() {
        let mock_response = r#"{"result": "error", "error-type": "invalid-key"}"#;
        let mock_server = create_mock_server(200, mock_response).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key", "USD");

        let err = provider.fetch_rates().await.unwrap_err();
        assert_eq!(
            err,
            ConversionError::ExternalCall("Provider error: invalid-key".to_string())
        );
    }

    #[tokio::test]
    async fn test_http_error_response() {
        let mock_server = create_mock_server(403, "").await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key", "USD");

        let err = provider.fetch_rates().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "External call failed: HTTP error: 403 Forbidden for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server(200, "not json").await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key", "USD");

        let err = provider.fetch_rates().await.unwrap_err();
        assert!(
            err.to_string()
                .contains("Failed to parse JSON response for USD")
        );
    }

    #[tokio::test]
    async fn test_missing_rates_field() {
        let mock_server = create_mock_server(200, r#"{"result": "success"}"#).await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "test-key", "USD");

        let err = provider.fetch_rates().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "External call failed: No conversion rates found for base currency: USD"
        );
    }

    #[tokio::test]
    async fn test_missing_key_hits_empty_path_segment() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v6//latest/USD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;
        let provider = ExchangeRateApiProvider::new(&mock_server.uri(), "", "usd");

        let err = provider.fetch_rates().await.unwrap_err();
        assert!(matches!(err, ConversionError::ExternalCall(_)));
    }

    #[test]
    fn test_configured_key_wins_over_env() {
        let provider = ExchangeRateApiProvider::from_env(DEFAULT_BASE_URL, Some("abc"), "USD");
        assert_eq!(
            provider.url(),
            "https://v6.exchangerate-api.com/v6/abc/latest/USD"
        );
    }
}
