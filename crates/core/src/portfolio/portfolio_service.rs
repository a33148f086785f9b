//! Portfolio service: registration, the trade ledger, valuation and
//! price refresh.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use rust_decimal::Decimal;

use coinfolio_market_data::{CoinQuote, PriceProvider};

use super::portfolio_model::*;
use super::portfolio_traits::{
    HoldingRepositoryTrait, PortfolioServiceTrait, TradeRepositoryTrait,
};
use crate::errors::{DatabaseError, Error, ValidationError};
use crate::Result;

/// Service for managing the portfolio.
///
/// Valuation (`get_portfolio_value`) is a pure read over stored prices;
/// freshness is an explicit, separate operation (`refresh_prices`).
pub struct PortfolioService {
    holdings: Arc<dyn HoldingRepositoryTrait>,
    trades: Arc<dyn TradeRepositoryTrait>,
    prices: Arc<dyn PriceProvider>,
}

impl PortfolioService {
    pub fn new(
        holdings: Arc<dyn HoldingRepositoryTrait>,
        trades: Arc<dyn TradeRepositoryTrait>,
        prices: Arc<dyn PriceProvider>,
    ) -> Self {
        Self {
            holdings,
            trades,
            prices,
        }
    }

    fn validate_trade(&self, new_trade: &NewTrade) -> Result<()> {
        if new_trade.quantity <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Trade quantity must be positive, got {}",
                new_trade.quantity
            ))
            .into());
        }
        if new_trade.unit_price <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Trade price must be positive, got {}",
                new_trade.unit_price
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn register_coin(
        &self,
        quote: &CoinQuote,
        quantity: Decimal,
        strategy: Option<String>,
    ) -> Result<Holding> {
        if quantity <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Initial quantity must be positive, got {}",
                quantity
            ))
            .into());
        }

        let holding = Holding {
            coin_id: quote.id,
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            entry_price: quote.price,
            last_price: quote.price,
            strategy,
            last_updated: Utc::now(),
        };

        let holding = self.holdings.upsert_holding(holding).await?;

        // The position itself lives in the ledger.
        self.trades
            .record_trade(NewTrade {
                coin_id: quote.id,
                side: TradeSide::Buy,
                quantity,
                unit_price: quote.price,
                notes: Some("Initial position".to_string()),
            })
            .await?;

        debug!("Registered {} ({}) in portfolio", holding.name, holding.symbol);

        Ok(holding)
    }

    async fn record_trade(&self, new_trade: NewTrade) -> Result<Trade> {
        self.validate_trade(&new_trade)?;

        if self.holdings.get_holding(new_trade.coin_id)?.is_none() {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "No registered coin with id {}",
                new_trade.coin_id
            ))));
        }

        self.trades.record_trade(new_trade).await
    }

    fn list_holdings(&self) -> Result<Vec<Holding>> {
        self.holdings.list_holdings()
    }

    fn compute_holdings(&self) -> Result<Vec<Position>> {
        self.trades.compute_holdings()
    }

    fn get_portfolio_value(&self) -> Result<PortfolioValuation> {
        let positions = self.trades.compute_holdings()?;
        let holdings: HashMap<u64, Holding> = self
            .holdings
            .list_holdings()?
            .into_iter()
            .map(|h| (h.coin_id, h))
            .collect();

        let mut rows = Vec::with_capacity(positions.len());
        let mut total_value = Decimal::ZERO;

        for position in positions {
            let Some(holding) = holdings.get(&position.coin_id) else {
                // Ledger rows for a deleted coin carry no identity or
                // prices, so they cannot be valued.
                warn!(
                    "Trades exist for unregistered coin {}; skipping in valuation",
                    position.coin_id
                );
                continue;
            };

            let value = position.quantity * holding.last_price;
            let profit_loss = value - position.quantity * holding.entry_price;
            total_value += value;

            rows.push(HoldingValuation {
                coin_id: position.coin_id,
                symbol: holding.symbol.clone(),
                name: holding.name.clone(),
                quantity: position.quantity,
                entry_price: holding.entry_price,
                last_price: holding.last_price,
                value,
                profit_loss,
                strategy: holding.strategy.clone(),
            });
        }

        Ok(PortfolioValuation {
            holdings: rows,
            total_value,
        })
    }

    async fn refresh_prices(&self) -> Result<PriceRefreshReport> {
        let holdings = self.holdings.list_holdings()?;
        let mut report = PriceRefreshReport::default();

        for holding in holdings {
            match self.prices.get_by_id(holding.coin_id).await {
                Ok(quote) => {
                    self.holdings
                        .update_last_price(holding.coin_id, quote.price)
                        .await?;
                    report.updated.push(RefreshedPrice {
                        coin_id: holding.coin_id,
                        symbol: holding.symbol,
                        price: quote.price,
                    });
                }
                Err(e) => {
                    // Stale-price degradation: keep the stored price and
                    // move on to the next coin.
                    warn!("Failed to refresh price for {}: {}", holding.symbol, e);
                    report.failed.push(FailedRefresh {
                        coin_id: holding.coin_id,
                        symbol: holding.symbol,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    async fn remove_coin(&self, coin_id: u64) -> Result<()> {
        self.holdings.delete_holding(coin_id).await
    }

    fn trade_history(&self) -> Result<Vec<TradeRecord>> {
        self.trades.trade_history()
    }
}
