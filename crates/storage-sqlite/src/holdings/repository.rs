use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;

use coinfolio_core::portfolio::{Holding, HoldingRepositoryTrait};
use coinfolio_core::Result;

use super::model::HoldingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::holdings;

pub struct HoldingRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl HoldingRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        HoldingRepository { pool, writer }
    }
}

#[async_trait]
impl HoldingRepositoryTrait for HoldingRepository {
    async fn upsert_holding(&self, holding: Holding) -> Result<Holding> {
        let holding_db = HoldingDB::from(&holding);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Holding> {
                // INSERT OR REPLACE: a duplicate coin id fully replaces
                // the existing row instead of erroring.
                let result_db = diesel::replace_into(holdings::table)
                    .values(&holding_db)
                    .returning(HoldingDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Holding::from(result_db))
            })
            .await
    }

    fn get_holding(&self, coin_id: u64) -> Result<Option<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        let holding_db = holdings::table
            .find(coin_id as i64)
            .first::<HoldingDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(holding_db.map(Holding::from))
    }

    fn list_holdings(&self) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        let holdings_db = holdings::table
            .order(holdings::coin_id.asc())
            .load::<HoldingDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(holdings_db.into_iter().map(Holding::from).collect())
    }

    async fn update_last_price(&self, coin_id: u64, price: Decimal) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::update(holdings::table.find(coin_id as i64))
                    .set((
                        holdings::last_price.eq(price.to_string()),
                        holdings::last_updated.eq(Utc::now().to_rfc3339()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete_holding(&self, coin_id: u64) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                // Delete-where-key: zero affected rows is not an error.
                diesel::delete(holdings::table.find(coin_id as i64))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
