//! Transient quote DTOs produced by the price provider.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A coin quote as returned by the price provider.
///
/// Symbol search is ambiguous (several coins share a ticker), so the
/// provider-assigned numeric `id` together with the display `name` is what
/// callers use to disambiguate. All monetary fields are quoted in USD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinQuote {
    /// Provider-assigned numeric identifier.
    pub id: u64,
    /// Ticker symbol, e.g. "BTC".
    pub symbol: String,
    /// Display name, e.g. "Bitcoin".
    pub name: String,
    /// URL slug, e.g. "bitcoin".
    pub slug: String,
    /// Latest USD price.
    pub price: Decimal,
    /// 24h trading volume in USD, when the provider reports one.
    pub volume_24h: Option<Decimal>,
    /// Market capitalization in USD, when the provider reports one.
    pub market_cap: Option<Decimal>,
    /// 24h percent change, when the provider reports one.
    pub percent_change_24h: Option<Decimal>,
    /// When the provider last updated this quote.
    pub last_updated: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_serializes_with_decimal_price() {
        let quote = CoinQuote {
            id: 1,
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            slug: "bitcoin".to_string(),
            price: dec!(64123.55),
            volume_24h: Some(dec!(31000000000)),
            market_cap: None,
            percent_change_24h: Some(dec!(-1.2)),
            last_updated: Utc::now(),
        };

        let json = serde_json::to_string(&quote).unwrap();
        assert!(json.contains("\"symbol\":\"BTC\""));
        assert!(json.contains("64123.55"));
    }
}
