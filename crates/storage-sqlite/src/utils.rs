//! Shared parsing helpers for SQLite storage models.
//!
//! Money and quantity columns are stored as text so SQLite never rounds
//! them; timestamps are stored as RFC 3339 text. These helpers convert
//! back tolerantly: a corrupt value is logged and replaced with a safe
//! default rather than poisoning a whole result set.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use coinfolio_core::portfolio::TradeSide;

/// Parse a stored decimal string, with a fallback for scientific
/// notation by parsing as f64 first.
pub fn parse_decimal_tolerant(value_str: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value_str) {
        Ok(d) => d,
        Err(e_decimal) => match f64::from_str(value_str) {
            Ok(f_val) => match Decimal::from_f64(f_val) {
                Some(dec_val) => dec_val,
                None => {
                    log::error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal.",
                        field_name,
                        value_str,
                        f_val
                    );
                    Decimal::ZERO
                }
            },
            Err(e_f64) => {
                log::error!(
                    "Failed to parse {} '{}': as Decimal (err: {}), and as f64 (err: {}). Falling back to ZERO.",
                    field_name, value_str, e_decimal, e_f64
                );
                Decimal::ZERO
            }
        },
    }
}

/// Parse a stored RFC 3339 timestamp, falling back to now.
pub fn parse_datetime_tolerant(value_str: &str, field_name: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(value_str) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            log::error!("Failed to parse {} '{}': {}", field_name, value_str, e);
            Utc::now()
        }
    }
}

/// Parse a stored trade side. CHECK constraints keep the columns to
/// BUY/SELL, so a parse failure means external tampering; it is logged
/// and read as BUY.
pub fn parse_side_tolerant(value_str: &str) -> TradeSide {
    value_str.parse::<TradeSide>().unwrap_or_else(|e| {
        log::error!("Failed to parse trade side: {}", e);
        TradeSide::Buy
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_plain() {
        assert_eq!(parse_decimal_tolerant("64123.55", "price"), dec!(64123.55));
    }

    #[test]
    fn test_parse_decimal_scientific_notation() {
        assert_eq!(parse_decimal_tolerant("1.5e2", "price"), dec!(150));
    }

    #[test]
    fn test_parse_decimal_garbage_falls_back_to_zero() {
        assert_eq!(parse_decimal_tolerant("not-a-number", "price"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_datetime_round_trip() {
        let now = Utc::now();
        let parsed = parse_datetime_tolerant(&now.to_rfc3339(), "timestamp");
        assert_eq!(parsed, now);
    }
}
