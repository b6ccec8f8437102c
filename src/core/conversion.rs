//! Conversion requests and results.
//!
//! The computation is deliberately plain `f64` arithmetic: the factor for the
//! target currency is multiplied into the amount and the product is rounded
//! half away from zero to two decimals for display.
use crate::core::error::{ConversionError, Result};
use crate::core::rates::RateTable;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::debug;

/// How a rate table is applied to an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// `amount * rate[to]`. Assumes the source currency is the table's base.
    #[default]
    Direct,
    /// `amount * rate[to] / rate[from]`.
    Cross,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: &str, to: &str) -> Self {
        ConversionRequest {
            amount,
            from: from.to_uppercase(),
            to: to.to_uppercase(),
        }
    }

    /// Only positive finite amounts lead to a conversion.
    pub fn is_actionable(&self) -> bool {
        is_valid_amount(self.amount) && !self.from.is_empty() && !self.to.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub value: f64,
}

impl ConversionResult {
    /// Value with exactly two fraction digits.
    pub fn formatted(&self) -> String {
        format!("{:.2}", self.value)
    }
}

impl Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// The source and target currency pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub from: String,
    pub to: String,
}

impl Selection {
    pub fn new(from: &str, to: &str) -> Self {
        Selection {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn swapped(&self) -> Self {
        let mut next = self.clone();
        next.swap();
        next
    }

    /// Exchanges both codes in one step.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn is_complete(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }
}

pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Parses user input into an amount. Blank or non-numeric input is `None`.
pub fn parse_amount(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|a| a.is_finite())
}

/// Rounds half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn convert(
    request: &ConversionRequest,
    table: &RateTable,
    mode: ConversionMode,
) -> Result<ConversionResult> {
    let to_rate = table
        .rate(&request.to)
        .ok_or_else(|| ConversionError::CurrencyUnavailable(request.to.clone()))?;

    let rate = match mode {
        ConversionMode::Direct => to_rate,
        ConversionMode::Cross => {
            let from_rate = table
                .rate(&request.from)
                .ok_or_else(|| ConversionError::CurrencyUnavailable(request.from.clone()))?;
            to_rate / from_rate
        }
    };

    let value = round2(request.amount * rate);
    debug!(
        amount = request.amount,
        from = %request.from,
        to = %request.to,
        rate,
        value,
        "Converted amount"
    );

    Ok(ConversionResult {
        amount: request.amount,
        from: request.from.clone(),
        to: request.to.clone(),
        rate,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RateTable {
        RateTable::new(
            "USD",
            vec![
                ("USD".to_string(), 1.0),
                ("EUR".to_string(), 0.92),
                ("INR".to_string(), 83.1234),
                ("JPY".to_string(), 151.5),
            ],
        )
    }

    #[test]
    fn test_direct_conversion_example() {
        let request = ConversionRequest::new(100.0, "USD", "EUR");
        let result = convert(&request, &sample_table(), ConversionMode::Direct).unwrap();
        assert_eq!(result.formatted(), "92.00");
        assert_eq!(result.to_string(), "92.00");
        assert_eq!(result.rate, 0.92);
    }

    #[test]
    fn test_result_always_has_two_fraction_digits() {
        let table = sample_table();
        for (amount, to, expected) in [
            (1.0, "INR", "83.12"),
            (2.5, "JPY", "378.75"),
            (3.0, "USD", "3.00"),
            (0.01, "EUR", "0.01"),
        ] {
            let request = ConversionRequest::new(amount, "USD", to);
            let result = convert(&request, &table, ConversionMode::Direct).unwrap();
            assert_eq!(result.formatted(), expected, "{amount} USD -> {to}");
        }
    }

    #[test]
    fn test_direct_mode_ignores_source_rate() {
        let request = ConversionRequest::new(10.0, "EUR", "JPY");
        let result = convert(&request, &sample_table(), ConversionMode::Direct).unwrap();
        assert_eq!(result.formatted(), "1515.00");
    }

    #[test]
    fn test_cross_mode_divides_by_source_rate() {
        let table = RateTable::new(
            "USD",
            vec![("EUR".to_string(), 0.5), ("GBP".to_string(), 0.25)],
        );
        let request = ConversionRequest::new(10.0, "EUR", "GBP");
        let result = convert(&request, &table, ConversionMode::Cross).unwrap();
        assert_eq!(result.formatted(), "5.00");
    }

    #[test]
    fn test_missing_target_is_unavailable() {
        let request = ConversionRequest::new(10.0, "USD", "XYZ");
        let err = convert(&request, &sample_table(), ConversionMode::Direct).unwrap_err();
        assert_eq!(err, ConversionError::CurrencyUnavailable("XYZ".to_string()));
        assert_eq!(err.to_string(), "Currency unavailable: XYZ");
    }

    #[test]
    fn test_cross_mode_missing_source_is_unavailable() {
        let request = ConversionRequest::new(10.0, "ABC", "EUR");
        let err = convert(&request, &sample_table(), ConversionMode::Cross).unwrap_err();
        assert_eq!(err, ConversionError::CurrencyUnavailable("ABC".to_string()));
    }

    #[test]
    fn test_round2_is_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_actionable_requests() {
        assert!(ConversionRequest::new(1.0, "USD", "EUR").is_actionable());
        assert!(!ConversionRequest::new(0.0, "USD", "EUR").is_actionable());
        assert!(!ConversionRequest::new(-5.0, "USD", "EUR").is_actionable());
        assert!(!ConversionRequest::new(f64::NAN, "USD", "EUR").is_actionable());
        assert!(!ConversionRequest::new(1.0, "", "EUR").is_actionable());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount("0"), Some(0.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_swap_is_involutive() {
        let selection = Selection::new("INR", "EUR");
        let once = selection.swapped();
        assert_eq!(once, Selection::new("EUR", "INR"));
        assert_eq!(once.swapped(), selection);
    }

    #[test]
    fn test_swap_with_empty_source() {
        let mut selection = Selection::new("", "USD");
        selection.swap();
        assert_eq!(selection.from, "USD");
        assert_eq!(selection.to, "");
        assert!(!selection.is_complete());
    }
}
