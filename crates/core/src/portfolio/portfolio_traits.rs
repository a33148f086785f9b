use super::portfolio_model::*;
use crate::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use coinfolio_market_data::CoinQuote;

/// Trait defining the contract for holding repository operations.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    /// Insert or fully replace the row sharing the coin id. Never errors
    /// on duplicate; replace is the intended semantics.
    async fn upsert_holding(&self, holding: Holding) -> Result<Holding>;
    fn get_holding(&self, coin_id: u64) -> Result<Option<Holding>>;
    fn list_holdings(&self) -> Result<Vec<Holding>>;
    /// Overwrite the last observed price and bump the update timestamp.
    async fn update_last_price(&self, coin_id: u64, price: Decimal) -> Result<()>;
    /// Delete-where-key: removing an absent coin id is a no-op.
    async fn delete_holding(&self, coin_id: u64) -> Result<()>;
}

/// Trait defining the contract for the append-only trade ledger.
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    async fn record_trade(&self, new_trade: NewTrade) -> Result<Trade>;
    /// Net open positions: for every coin with a positive signed sum of
    /// trade quantities, the quantity, latest stored price and value.
    /// Closed positions (net <= 0) are silently omitted.
    fn compute_holdings(&self) -> Result<Vec<Position>>;
    /// All trades joined with coin identity, newest first.
    fn trade_history(&self) -> Result<Vec<TradeRecord>>;
}

/// Trait defining the contract for portfolio service operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    /// Register a coin from a provider quote and record the initial BUY
    /// trade at the quoted price.
    async fn register_coin(
        &self,
        quote: &CoinQuote,
        quantity: Decimal,
        strategy: Option<String>,
    ) -> Result<Holding>;
    /// Validate and append a trade to the ledger.
    async fn record_trade(&self, new_trade: NewTrade) -> Result<Trade>;
    fn list_holdings(&self) -> Result<Vec<Holding>>;
    fn compute_holdings(&self) -> Result<Vec<Position>>;
    /// Pure valuation over stored prices; never touches the network.
    fn get_portfolio_value(&self) -> Result<PortfolioValuation>;
    /// Re-fetch every held coin's price, persisting each success. Per-coin
    /// failures are logged and reported, never raised.
    async fn refresh_prices(&self) -> Result<PriceRefreshReport>;
    /// Remove a registered coin. Absent ids are a no-op.
    async fn remove_coin(&self, coin_id: u64) -> Result<()>;
    fn trade_history(&self) -> Result<Vec<TradeRecord>>;
}
