//! Rate table and the rate source abstraction

use crate::core::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::warn;

/// Conversion factors from a single base currency, as returned by one fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: String,
    rates: BTreeMap<String, f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl RateTable {
    /// Builds a table, dropping any factor that is not positive and finite.
    pub fn new<I>(base: &str, rates: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let rates = rates
            .into_iter()
            .filter_map(|(code, rate)| {
                if rate.is_finite() && rate > 0.0 {
                    Some((code.to_uppercase(), rate))
                } else {
                    warn!(%code, rate, "Dropping invalid rate");
                    None
                }
            })
            .collect();

        RateTable {
            base: base.to_uppercase(),
            rates,
            last_updated: None,
        }
    }

    pub fn with_last_updated(mut self, last_updated: Option<DateTime<Utc>>) -> Self {
        self.last_updated = last_updated;
        self
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_uppercase()).copied()
    }

    /// Currency codes in sorted order.
    pub fn currencies(&self) -> Vec<String> {
        self.rates.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<RateTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rates_are_dropped() {
        let table = RateTable::new(
            "usd",
            vec![
                ("EUR".to_string(), 0.92),
                ("BAD".to_string(), 0.0),
                ("NEG".to_string(), -1.5),
                ("NAN".to_string(), f64::NAN),
                ("INF".to_string(), f64::INFINITY),
                ("gbp".to_string(), 0.79),
            ],
        );

        assert_eq!(table.base, "USD");
        assert_eq!(table.len(), 2);
        assert_eq!(table.currencies(), vec!["EUR", "GBP"]);
        assert_eq!(table.rate("gbp"), Some(0.79));
        assert!(table.rate("BAD").is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = RateTable::new("USD", Vec::new());
        assert!(table.is_empty());
        assert!(table.currencies().is_empty());
        assert!(table.last_updated.is_none());
    }
}
