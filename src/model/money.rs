//! Monetary value normalization.
//!
//! All monetary amounts travel the wire as strings and are held as exact
//! decimals. Binary floating point never enters the picture: values are
//! constructed only from strings or other decimals, with no rounding and no
//! silent truncation.

use rust_decimal::Decimal;

use crate::error::{ClientError, Result};

/// Parses a wire scalar into an exact decimal.
///
/// # Errors
///
/// Returns [`ClientError::Validation`] if the string is not a valid decimal
/// literal.
pub fn parse_decimal(raw: &str) -> Result<Decimal> {
    Decimal::from_str_exact(raw)
        .map_err(|e| ClientError::Validation(format!("invalid decimal literal {raw:?}: {e}")))
}

/// Serde adapter for monetary fields: decimals as strings on the wire.
pub mod decimal_string {
    use rust_decimal::Decimal;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serializes a decimal as its exact string form.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserializes a decimal from its wire string, failing closed on
    /// unparsable input.
    ///
    /// # Errors
    ///
    /// Fails if the wire value is not a valid decimal literal.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_decimal(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[test]
    fn test_parse_decimal_monetary_amount() {
        let amount = parse_decimal("19.99").unwrap();
        assert_eq!(amount.to_string(), "19.99");
    }

    #[test]
    fn test_parse_decimal_preserves_scale() {
        // No silent truncation of trailing zeroes.
        assert_eq!(parse_decimal("10.00").unwrap().to_string(), "10.00");
        assert_eq!(parse_decimal("0.1").unwrap().to_string(), "0.1");
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        for raw in ["", "abc", "19.99.1", "1e", "12,50"] {
            let result = parse_decimal(raw);
            assert!(result.is_err(), "expected rejection for {raw:?}");
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Amount {
        #[serde(with = "decimal_string")]
        value: Decimal,
    }

    #[test]
    fn test_wire_round_trip() {
        let parsed: Amount = serde_json::from_str(r#"{"value":"19.99"}"#).unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"value":"19.99"}"#);
    }

    #[test]
    fn test_wire_rejects_number_literal_garbage() {
        assert!(serde_json::from_str::<Amount>(r#"{"value":"not-money"}"#).is_err());
    }
}
