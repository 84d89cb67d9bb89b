//! Currency conversion abstractions

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Deserializer, de};
use std::collections::HashMap;

use super::error::ConversionError;

/// Layout of the rate publication time shown to users.
pub const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rates published by the service, relative to the base currency of the request.
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(deserialize_with = "single_precision_rates")]
    pub rates: HashMap<String, f32>,
}

/// Narrows every rate to `f32`, rejecting values that overflow it.
fn single_precision_rates<'de, D>(deserializer: D) -> Result<HashMap<String, f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let wide = HashMap::<String, f64>::deserialize(deserializer)?;
    wide.into_iter()
        .map(|(currency, rate)| {
            let narrowed = rate as f32;
            if narrowed.is_finite() {
                Ok((currency, narrowed))
            } else {
                Err(de::Error::custom(format!(
                    "rate {rate} for {currency} does not fit in single precision"
                )))
            }
        })
        .collect()
}

impl RateTable {
    pub fn rate(&self, currency: &str) -> Result<f32, ConversionError> {
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| ConversionError::RateNotFound(currency.to_string()))
    }

    /// Applies the rate for `currency` to `amount` in single precision.
    pub fn convert(&self, currency: &str, amount: i64) -> Result<Conversion, ConversionError> {
        let rate = self.rate(currency)?;
        Ok(Conversion {
            value: rate * amount as f32,
            published_at: format_published_at(&self.timestamp, &Local),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub value: f32,
    pub published_at: String,
}

/// Renders a publication time as civil time in `tz`, e.g. `2024-09-06 18:29:05`.
pub fn format_published_at<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp
        .with_timezone(tz)
        .format(PUBLISHED_AT_FORMAT)
        .to_string()
}

#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    /// Converts `amount` units of `from` into `to`.
    async fn convert(&self, from: &str, to: &str, amount: i64)
    -> Result<Conversion, ConversionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{"timestamp":1725647345,"base":"EUR","rates":{"USD":1.108469,"GBP":0.84}}"#;

    #[test]
    fn test_decode_ignores_extra_fields() {
        let table: RateTable = serde_json::from_str(RESPONSE).unwrap();
        assert_eq!(table.timestamp.timestamp(), 1725647345);
        assert_eq!(table.rates.len(), 2);
        assert_eq!(table.rates["USD"], 1.108469);
    }

    #[test]
    fn test_decode_rejects_missing_rates() {
        let result = serde_json::from_str::<RateTable>(r#"{"timestamp":1725647345}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_rate_overflowing_f32() {
        let err = serde_json::from_str::<RateTable>(r#"{"timestamp":1,"rates":{"USD":1e40}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("USD"));

        let negative = r#"{"timestamp":1,"rates":{"USD":-1e39}}"#;
        assert!(serde_json::from_str::<RateTable>(negative).is_err());
    }

    #[test]
    fn test_decode_keeps_largest_f32_rate() {
        let body = format!(r#"{{"timestamp":1,"rates":{{"USD":{}}}}}"#, f32::MAX);
        let table: RateTable = serde_json::from_str(&body).unwrap();
        assert_eq!(table.rates["USD"], f32::MAX);
    }

    #[test]
    fn test_decode_rejects_out_of_range_timestamp() {
        let body = format!(r#"{{"timestamp":{},"rates":{{}}}}"#, i64::MAX);
        assert!(serde_json::from_str::<RateTable>(&body).is_err());
    }

    #[test]
    fn test_convert_multiplies_in_single_precision() {
        let table: RateTable = serde_json::from_str(RESPONSE).unwrap();
        for amount in [0_i64, 1, 10, -3, 1_000_000] {
            let conversion = table.convert("USD", amount).unwrap();
            assert_eq!(conversion.value, 1.108469_f32 * amount as f32);
        }
    }

    #[test]
    fn test_convert_missing_rate() {
        let table: RateTable = serde_json::from_str(RESPONSE).unwrap();
        match table.convert("JPY", 10) {
            Err(ConversionError::RateNotFound(code)) => assert_eq!(code, "JPY"),
            other => panic!("Expected RateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_format_published_at_utc() {
        let ts = Utc.timestamp_opt(1725647345, 0).unwrap();
        assert_eq!(format_published_at(&ts, &Utc), "2024-09-06 18:29:05");
    }

    #[test]
    fn test_format_published_at_is_zero_padded() {
        let ts = Utc.timestamp_opt(946_688_461, 0).unwrap();
        assert_eq!(format_published_at(&ts, &Utc), "2000-01-01 01:01:01");
    }

    #[test]
    fn test_format_published_at_fixed_offset() {
        let ts = Utc.timestamp_opt(1725647345, 0).unwrap();
        let paris = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(format_published_at(&ts, &paris), "2024-09-06 20:29:05");
    }
}
