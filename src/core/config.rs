use crate::core::conversion::ConversionMode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeolocationProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub exchange_rate: Option<ExchangeRateProviderConfig>,
    pub geolocation: Option<GeolocationProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            exchange_rate: Some(ExchangeRateProviderConfig {
                base_url: "https://v6.exchangerate-api.com".to_string(),
                api_key: None,
            }),
            geolocation: Some(GeolocationProviderConfig {
                base_url: "https://ipapi.co".to_string(),
            }),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Initial target currency.
    #[serde(default = "default_currency")]
    pub default_to: String,
    /// Currency every fetched rate is relative to.
    #[serde(default = "default_currency")]
    pub base_currency: String,
    #[serde(default)]
    pub conversion_mode: ConversionMode,
    #[serde(default)]
    pub clear_result_on_change: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            default_to: default_currency(),
            base_currency: default_currency(),
            conversion_mode: ConversionMode::default(),
            clear_result_on_change: false,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "xconv", "xconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn exchange_rate_base_url(&self) -> &str {
        self.providers
            .exchange_rate
            .as_ref()
            .map_or("https://v6.exchangerate-api.com", |p| &p.base_url)
    }

    pub fn exchange_rate_api_key(&self) -> Option<&str> {
        self.providers
            .exchange_rate
            .as_ref()
            .and_then(|p| p.api_key.as_deref())
    }

    pub fn geolocation_base_url(&self) -> &str {
        self.providers
            .geolocation
            .as_ref()
            .map_or("https://ipapi.co", |p| &p.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.default_to, "USD");
        assert_eq!(config.base_currency, "USD");
        assert_eq!(config.conversion_mode, ConversionMode::Direct);
        assert!(!config.clear_result_on_change);
        assert_eq!(
            config.exchange_rate_base_url(),
            "https://v6.exchangerate-api.com"
        );
        assert_eq!(config.geolocation_base_url(), "https://ipapi.co");
        assert!(config.exchange_rate_api_key().is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  exchange_rate:
    base_url: "http://example.com/rates"
    api_key: "secret"
  geolocation:
    base_url: "http://example.com/geo"
default_to: "EUR"
conversion_mode: cross
clear_result_on_change: true
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.exchange_rate_base_url(), "http://example.com/rates");
        assert_eq!(config.exchange_rate_api_key(), Some("secret"));
        assert_eq!(config.geolocation_base_url(), "http://example.com/geo");
        assert_eq!(config.default_to, "EUR");
        assert_eq!(config.base_currency, "USD");
        assert_eq!(config.conversion_mode, ConversionMode::Cross);
        assert!(config.clear_result_on_change);
    }

    #[test]
    fn test_partial_providers() {
        let yaml_str = r#"
providers:
  geolocation:
    base_url: "http://localhost:9000"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert!(config.providers.exchange_rate.is_none());
        assert_eq!(
            config.exchange_rate_base_url(),
            "https://v6.exchangerate-api.com"
        );
        assert_eq!(config.geolocation_base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        let result = serde_yaml::from_str::<AppConfig>("conversion_mode: sideways");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = AppConfig::load_from_path(dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
