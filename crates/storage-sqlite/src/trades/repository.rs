use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;

use coinfolio_core::portfolio::{NewTrade, Position, Trade, TradeRecord, TradeRepositoryTrait};
use coinfolio_core::Result;

use super::model::TradeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::holdings::HoldingDB;
use crate::schema::{holdings, trades};

pub struct TradeRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl TradeRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        TradeRepository { pool, writer }
    }
}

#[async_trait]
impl TradeRepositoryTrait for TradeRepository {
    async fn record_trade(&self, new_trade: NewTrade) -> Result<Trade> {
        let trade_db = TradeDB {
            id: Uuid::new_v4().to_string(),
            coin_id: new_trade.coin_id as i64,
            side: new_trade.side.as_str().to_string(),
            quantity: new_trade.quantity.to_string(),
            unit_price: new_trade.unit_price.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            notes: new_trade.notes,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trade> {
                let result_db = diesel::insert_into(trades::table)
                    .values(&trade_db)
                    .returning(TradeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Trade::from(result_db))
            })
            .await
    }

    fn compute_holdings(&self) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;

        // Ledger quantities are stored as text to keep them exact, so the
        // signed sum happens here in Decimal instead of in SQL.
        let trades_db = trades::table
            .load::<TradeDB>(&mut conn)
            .map_err(StorageError::from)?;

        let mut net: BTreeMap<i64, Decimal> = BTreeMap::new();
        for trade_db in &trades_db {
            let trade = Trade::from(trade_db.clone());
            *net.entry(trade_db.coin_id).or_default() += trade.side.signum() * trade.quantity;
        }

        let holdings_db = holdings::table
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;
        let identities: BTreeMap<i64, HoldingDB> = holdings_db
            .into_iter()
            .map(|h| (h.coin_id, h))
            .collect();

        // Closed positions (net <= 0) are silently omitted, and so are
        // ledger rows whose coin is no longer registered.
        let positions = net
            .into_iter()
            .filter(|(_, quantity)| *quantity > Decimal::ZERO)
            .filter_map(|(coin_id, quantity)| {
                identities.get(&coin_id).map(|h| {
                    let last_price =
                        crate::utils::parse_decimal_tolerant(&h.last_price, "last_price");
                    Position {
                        coin_id: coin_id as u64,
                        symbol: h.symbol.clone(),
                        name: h.name.clone(),
                        quantity,
                        last_price,
                        value: quantity * last_price,
                    }
                })
            })
            .collect();

        Ok(positions)
    }

    fn trade_history(&self) -> Result<Vec<TradeRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = trades::table
            .inner_join(holdings::table)
            .order(trades::timestamp.desc())
            .select((TradeDB::as_select(), HoldingDB::as_select()))
            .load::<(TradeDB, HoldingDB)>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(rows
            .into_iter()
            .map(|(trade_db, holding_db)| {
                let trade = Trade::from(trade_db);
                TradeRecord {
                    id: trade.id,
                    coin_id: trade.coin_id,
                    symbol: holding_db.symbol,
                    name: holding_db.name,
                    side: trade.side,
                    quantity: trade.quantity,
                    unit_price: trade.unit_price,
                    total_value: trade.quantity * trade.unit_price,
                    timestamp: trade.timestamp,
                    notes: trade.notes,
                }
            })
            .collect())
    }
}
