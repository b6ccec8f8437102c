//! Default currency detection from the caller's location

use crate::core::error::Result;
use crate::core::notify::Notifier;
use async_trait::async_trait;
use tracing::{debug, error};

pub const FALLBACK_CURRENCY: &str = "USD";

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn detect_currency(&self) -> Result<String>;
}

/// Asks the location provider once and falls back to USD on any failure.
pub async fn detect_default_currency(
    provider: &dyn LocationProvider,
    notifier: &dyn Notifier,
) -> String {
    match provider.detect_currency().await {
        Ok(code) if !code.trim().is_empty() => {
            let code = code.trim().to_uppercase();
            debug!(%code, "Detected default currency");
            code
        }
        Ok(_) => {
            error!("Location response carried an empty currency");
            notifier.notify_error("Error detecting location", "No currency in response");
            FALLBACK_CURRENCY.to_string()
        }
        Err(e) => {
            error!(error = %e, "Location detection failed");
            notifier.notify_error("Error detecting location", &e.to_string());
            FALLBACK_CURRENCY.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ConversionError;
    use crate::core::notify::RecordingNotifier;

    struct FixedLocation(Result<String>);

    #[async_trait]
    impl LocationProvider for FixedLocation {
        async fn detect_currency(&self) -> Result<String> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_detected_currency_is_used() {
        let notifier = RecordingNotifier::new();
        let provider = FixedLocation(Ok("inr".to_string()));
        assert_eq!(detect_default_currency(&provider, &notifier).await, "INR");
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_usd() {
        let notifier = RecordingNotifier::new();
        let provider = FixedLocation(Err(ConversionError::ExternalCall("boom".to_string())));
        assert_eq!(detect_default_currency(&provider, &notifier).await, "USD");

        let notifications = notifier.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "Error detecting location");
        assert_eq!(notifications[0].description, "External call failed: boom");
    }

    #[tokio::test]
    async fn test_empty_currency_falls_back_to_usd() {
        let notifier = RecordingNotifier::new();
        let provider = FixedLocation(Ok("  ".to_string()));
        assert_eq!(detect_default_currency(&provider, &notifier).await, "USD");
        assert_eq!(notifier.notifications().len(), 1);
    }
}
