#[cfg(test)]
mod tests {
    use crate::errors::Error;
    use crate::portfolio::portfolio_model::*;
    use crate::portfolio::portfolio_traits::{
        HoldingRepositoryTrait, PortfolioServiceTrait, TradeRepositoryTrait,
    };
    use crate::portfolio::PortfolioService;
    use crate::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use coinfolio_market_data::{CoinQuote, MarketDataError, PriceProvider};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    // --- Mock holding repository ---
    struct MockHoldingRepository {
        rows: Arc<Mutex<HashMap<u64, Holding>>>,
    }

    #[async_trait]
    impl HoldingRepositoryTrait for MockHoldingRepository {
        async fn upsert_holding(&self, holding: Holding) -> Result<Holding> {
            self.rows
                .lock()
                .unwrap()
                .insert(holding.coin_id, holding.clone());
            Ok(holding)
        }

        fn get_holding(&self, coin_id: u64) -> Result<Option<Holding>> {
            Ok(self.rows.lock().unwrap().get(&coin_id).cloned())
        }

        fn list_holdings(&self) -> Result<Vec<Holding>> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn update_last_price(&self, coin_id: u64, price: Decimal) -> Result<()> {
            if let Some(row) = self.rows.lock().unwrap().get_mut(&coin_id) {
                row.last_price = price;
                row.last_updated = Utc::now();
            }
            Ok(())
        }

        async fn delete_holding(&self, coin_id: u64) -> Result<()> {
            self.rows.lock().unwrap().remove(&coin_id);
            Ok(())
        }
    }

    // --- Mock trade repository (shares the holding map for joins) ---
    struct MockTradeRepository {
        trades: Arc<Mutex<Vec<Trade>>>,
        holdings: Arc<Mutex<HashMap<u64, Holding>>>,
    }

    #[async_trait]
    impl TradeRepositoryTrait for MockTradeRepository {
        async fn record_trade(&self, new_trade: NewTrade) -> Result<Trade> {
            let trade = Trade {
                id: format!("trade-{}", self.trades.lock().unwrap().len()),
                coin_id: new_trade.coin_id,
                side: new_trade.side,
                quantity: new_trade.quantity,
                unit_price: new_trade.unit_price,
                timestamp: Utc::now(),
                notes: new_trade.notes,
            };
            self.trades.lock().unwrap().push(trade.clone());
            Ok(trade)
        }

        fn compute_holdings(&self) -> Result<Vec<Position>> {
            let mut net: HashMap<u64, Decimal> = HashMap::new();
            for trade in self.trades.lock().unwrap().iter() {
                *net.entry(trade.coin_id).or_default() +=
                    trade.side.signum() * trade.quantity;
            }

            let holdings = self.holdings.lock().unwrap();
            let mut positions: Vec<Position> = net
                .into_iter()
                .filter(|(_, quantity)| *quantity > Decimal::ZERO)
                .filter_map(|(coin_id, quantity)| {
                    holdings.get(&coin_id).map(|h| Position {
                        coin_id,
                        symbol: h.symbol.clone(),
                        name: h.name.clone(),
                        quantity,
                        last_price: h.last_price,
                        value: quantity * h.last_price,
                    })
                })
                .collect();
            positions.sort_by_key(|p| p.coin_id);
            Ok(positions)
        }

        fn trade_history(&self) -> Result<Vec<TradeRecord>> {
            let holdings = self.holdings.lock().unwrap();
            let mut records: Vec<TradeRecord> = self
                .trades
                .lock()
                .unwrap()
                .iter()
                .filter_map(|t| {
                    holdings.get(&t.coin_id).map(|h| TradeRecord {
                        id: t.id.clone(),
                        coin_id: t.coin_id,
                        symbol: h.symbol.clone(),
                        name: h.name.clone(),
                        side: t.side,
                        quantity: t.quantity,
                        unit_price: t.unit_price,
                        total_value: t.quantity * t.unit_price,
                        timestamp: t.timestamp,
                        notes: t.notes.clone(),
                    })
                })
                .collect();
            records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            Ok(records)
        }
    }

    // --- Mock price provider ---
    struct MockPriceProvider {
        prices: HashMap<u64, Decimal>,
        failing: HashSet<u64>,
    }

    impl MockPriceProvider {
        fn quote(&self, id: u64, price: Decimal) -> CoinQuote {
            CoinQuote {
                id,
                symbol: format!("C{}", id),
                name: format!("Coin {}", id),
                slug: format!("coin-{}", id),
                price,
                volume_24h: None,
                market_cap: None,
                percent_change_24h: None,
                last_updated: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl PriceProvider for MockPriceProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        async fn search_by_symbol(
            &self,
            symbol: &str,
        ) -> std::result::Result<Vec<CoinQuote>, MarketDataError> {
            Err(MarketDataError::SymbolNotFound(symbol.to_string()))
        }

        async fn get_by_id(&self, id: u64) -> std::result::Result<CoinQuote, MarketDataError> {
            if self.failing.contains(&id) {
                return Err(MarketDataError::ProviderError {
                    provider: "MOCK".to_string(),
                    message: "simulated outage".to_string(),
                });
            }
            self.prices
                .get(&id)
                .map(|price| self.quote(id, *price))
                .ok_or(MarketDataError::IdNotFound(id))
        }

        async fn get_by_ids(
            &self,
            ids: &[u64],
        ) -> std::result::Result<Vec<CoinQuote>, MarketDataError> {
            let mut quotes = Vec::new();
            for id in ids {
                if let Ok(q) = self.get_by_id(*id).await {
                    quotes.push(q);
                }
            }
            Ok(quotes)
        }
    }

    // --- Test fixture ---
    struct Fixture {
        service: PortfolioService,
        holdings: Arc<Mutex<HashMap<u64, Holding>>>,
    }

    fn fixture(prices: HashMap<u64, Decimal>, failing: HashSet<u64>) -> Fixture {
        let rows = Arc::new(Mutex::new(HashMap::new()));
        let trades = Arc::new(Mutex::new(Vec::new()));

        let holding_repo = Arc::new(MockHoldingRepository { rows: rows.clone() });
        let trade_repo = Arc::new(MockTradeRepository {
            trades,
            holdings: rows.clone(),
        });
        let provider = Arc::new(MockPriceProvider { prices, failing });

        Fixture {
            service: PortfolioService::new(holding_repo, trade_repo, provider),
            holdings: rows,
        }
    }

    fn btc_quote(price: Decimal) -> CoinQuote {
        CoinQuote {
            id: 1,
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            slug: "bitcoin".to_string(),
            price,
            volume_24h: None,
            market_cap: None,
            percent_change_24h: None,
            last_updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_coin_creates_holding_and_initial_buy() {
        let f = fixture(HashMap::new(), HashSet::new());

        let holding = f
            .service
            .register_coin(&btc_quote(dec!(10)), dec!(2), Some("hodl".to_string()))
            .await
            .unwrap();

        assert_eq!(holding.entry_price, dec!(10));
        assert_eq!(holding.last_price, dec!(10));

        let positions = f.service.compute_holdings().unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].quantity, dec!(2));
    }

    #[tokio::test]
    async fn test_record_trade_rejects_non_positive_quantity_and_price() {
        let f = fixture(HashMap::new(), HashSet::new());
        f.service
            .register_coin(&btc_quote(dec!(10)), dec!(1), None)
            .await
            .unwrap();

        let err = f
            .service
            .record_trade(NewTrade {
                coin_id: 1,
                side: TradeSide::Sell,
                quantity: dec!(0),
                unit_price: dec!(10),
                notes: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = f
            .service
            .record_trade(NewTrade {
                coin_id: 1,
                side: TradeSide::Buy,
                quantity: dec!(1),
                unit_price: dec!(-5),
                notes: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_record_trade_rejects_unregistered_coin() {
        let f = fixture(HashMap::new(), HashSet::new());

        let err = f
            .service
            .record_trade(NewTrade {
                coin_id: 42,
                side: TradeSide::Buy,
                quantity: dec!(1),
                unit_price: dec!(10),
                notes: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Database(_)));
    }

    #[tokio::test]
    async fn test_valuation_buy_then_partial_sell() {
        // BUY 2 @ $10, SELL 0.5 @ $12, last price $11:
        // net 1.5, value 16.50, profit 16.50 - 15.00 = 1.50.
        let f = fixture(HashMap::new(), HashSet::new());
        f.service
            .register_coin(&btc_quote(dec!(10)), dec!(2), None)
            .await
            .unwrap();
        f.service
            .record_trade(NewTrade {
                coin_id: 1,
                side: TradeSide::Sell,
                quantity: dec!(0.5),
                unit_price: dec!(12),
                notes: None,
            })
            .await
            .unwrap();

        f.holdings.lock().unwrap().get_mut(&1).unwrap().last_price = dec!(11);

        let valuation = f.service.get_portfolio_value().unwrap();
        assert_eq!(valuation.holdings.len(), 1);

        let row = &valuation.holdings[0];
        assert_eq!(row.quantity, dec!(1.5));
        assert_eq!(row.value, dec!(16.50));
        assert_eq!(row.profit_loss, dec!(1.50));
        assert_eq!(valuation.total_value, dec!(16.50));
    }

    #[tokio::test]
    async fn test_total_is_sum_of_holding_values() {
        let f = fixture(HashMap::new(), HashSet::new());
        f.service
            .register_coin(&btc_quote(dec!(10)), dec!(2), None)
            .await
            .unwrap();

        let eth = CoinQuote {
            id: 2,
            symbol: "ETH".to_string(),
            name: "Ethereum".to_string(),
            slug: "ethereum".to_string(),
            price: dec!(4),
            volume_24h: None,
            market_cap: None,
            percent_change_24h: None,
            last_updated: Utc::now(),
        };
        f.service.register_coin(&eth, dec!(3), None).await.unwrap();

        let valuation = f.service.get_portfolio_value().unwrap();
        let sum: Decimal = valuation.holdings.iter().map(|h| h.value).sum();
        assert_eq!(valuation.total_value, sum);
        assert_eq!(valuation.total_value, dec!(32));
    }

    #[tokio::test]
    async fn test_closed_position_excluded_from_valuation() {
        let f = fixture(HashMap::new(), HashSet::new());
        f.service
            .register_coin(&btc_quote(dec!(10)), dec!(1), None)
            .await
            .unwrap();
        f.service
            .record_trade(NewTrade {
                coin_id: 1,
                side: TradeSide::Sell,
                quantity: dec!(1),
                unit_price: dec!(12),
                notes: None,
            })
            .await
            .unwrap();

        let valuation = f.service.get_portfolio_value().unwrap();
        assert!(valuation.holdings.is_empty());
        assert_eq!(valuation.total_value, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_refresh_updates_prices_on_success() {
        let mut prices = HashMap::new();
        prices.insert(1u64, dec!(15));
        let f = fixture(prices, HashSet::new());

        f.service
            .register_coin(&btc_quote(dec!(10)), dec!(1), None)
            .await
            .unwrap();

        let report = f.service.refresh_prices().await.unwrap();
        assert_eq!(report.updated.len(), 1);
        assert!(report.failed.is_empty());
        assert_eq!(
            f.holdings.lock().unwrap().get(&1).unwrap().last_price,
            dec!(15)
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_stored_price_and_does_not_raise() {
        let mut failing = HashSet::new();
        failing.insert(1u64);
        let f = fixture(HashMap::new(), failing);

        f.service
            .register_coin(&btc_quote(dec!(10)), dec!(1), None)
            .await
            .unwrap();

        let report = f.service.refresh_prices().await.unwrap();
        assert!(report.updated.is_empty());
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].message.contains("simulated outage"));
        // Stale-price degradation: the stored price is untouched.
        assert_eq!(
            f.holdings.lock().unwrap().get(&1).unwrap().last_price,
            dec!(10)
        );
    }

    #[tokio::test]
    async fn test_remove_missing_coin_is_noop() {
        let f = fixture(HashMap::new(), HashSet::new());
        assert!(f.service.remove_coin(404).await.is_ok());
    }
}
