//! Portfolio domain models.
//!
//! Holdings carry identity, prices and strategy only; the quantity of a
//! position is always derived from the trade ledger, so there is no
//! mutable amount column anywhere to drift out of sync.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a trade. BUY enlarges the position, SELL reduces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }

    /// The sign this side contributes to the net position.
    pub fn signum(&self) -> Decimal {
        match self {
            TradeSide::Buy => Decimal::ONE,
            TradeSide::Sell => Decimal::NEGATIVE_ONE,
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeSide {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            other => Err(format!("Unknown trade side: {}", other)),
        }
    }
}

/// A registered coin: identity, cost basis and the last observed price.
///
/// `coin_id` is the price provider's numeric identifier and the natural
/// key. Upserting a holding fully replaces any existing row with the same
/// id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub coin_id: u64,
    pub symbol: String,
    pub name: String,
    /// Price at which the position was opened.
    pub entry_price: Decimal,
    /// Last price observed from the provider.
    pub last_price: Decimal,
    /// Free-text strategy note, if any.
    pub strategy: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// An immutable ledger row. Once recorded a trade is never changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub coin_id: u64,
    pub side: TradeSide,
    pub quantity: Decimal,
    /// Unit price in USD at execution.
    pub unit_price: Decimal,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Input for recording a new trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub coin_id: u64,
    pub side: TradeSide,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub notes: Option<String>,
}

/// An open position: the ledger-derived net quantity for one coin,
/// joined against the holding's latest stored price.
///
/// Coins whose net quantity is zero or negative never appear here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub coin_id: u64,
    pub symbol: String,
    pub name: String,
    /// Signed sum of BUY (+) and SELL (-) trade quantities.
    pub quantity: Decimal,
    pub last_price: Decimal,
    /// quantity x last_price.
    pub value: Decimal,
}

/// One holding's contribution to the portfolio valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub coin_id: u64,
    pub symbol: String,
    pub name: String,
    pub quantity: Decimal,
    pub entry_price: Decimal,
    pub last_price: Decimal,
    /// quantity x last_price.
    pub value: Decimal,
    /// value - quantity x entry_price.
    pub profit_loss: Decimal,
    pub strategy: Option<String>,
}

/// Full portfolio valuation: per-holding rows plus the total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub holdings: Vec<HoldingValuation>,
    pub total_value: Decimal,
}

/// A trade joined with its coin's identity, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: String,
    pub coin_id: u64,
    pub symbol: String,
    pub name: String,
    pub side: TradeSide,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// quantity x unit_price at execution.
    pub total_value: Decimal,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

/// A price successfully refreshed for one coin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedPrice {
    pub coin_id: u64,
    pub symbol: String,
    pub price: Decimal,
}

/// A per-coin refresh failure. The stored price stays unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedRefresh {
    pub coin_id: u64,
    pub symbol: String,
    pub message: String,
}

/// Outcome of a batch price refresh. One coin's failure never aborts the
/// batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRefreshReport {
    pub updated: Vec<RefreshedPrice>,
    pub failed: Vec<FailedRefresh>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trade_side_round_trip() {
        assert_eq!("buy".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("SELL".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert!("HODL".parse::<TradeSide>().is_err());
        assert_eq!(TradeSide::Buy.as_str(), "BUY");
    }

    #[test]
    fn test_trade_side_signum() {
        assert_eq!(TradeSide::Buy.signum(), Decimal::ONE);
        assert_eq!(TradeSide::Sell.signum(), Decimal::NEGATIVE_ONE);
    }
}
