//! Global market snapshot model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time read of the overall market, produced by an external
/// collector. The core only ever reads the most recent row; it never
/// updates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// Total market capitalization in USD.
    pub total_market_cap: Decimal,
    /// BTC's share of the total market cap, as a percentage.
    pub btc_dominance: Decimal,
    /// Qualitative sentiment label, e.g. "fear" or "greed".
    pub sentiment: String,
    pub timestamp: DateTime<Utc>,
}
