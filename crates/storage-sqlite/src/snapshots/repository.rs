use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use coinfolio_core::market::{MarketSnapshot, SnapshotRepositoryTrait};
use coinfolio_core::Result;

use super::model::MarketSnapshotDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::market_snapshots;

pub struct SnapshotRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl SnapshotRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        SnapshotRepository { pool, writer }
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    fn latest_snapshot(&self) -> Result<Option<MarketSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let snapshot_db = market_snapshots::table
            .order(market_snapshots::timestamp.desc())
            .first::<MarketSnapshotDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(snapshot_db.map(MarketSnapshot::from))
    }

    async fn record_snapshot(&self, snapshot: MarketSnapshot) -> Result<MarketSnapshot> {
        let snapshot_db = MarketSnapshotDB {
            id: Uuid::new_v4().to_string(),
            total_market_cap: snapshot.total_market_cap.to_string(),
            btc_dominance: snapshot.btc_dominance.to_string(),
            sentiment: snapshot.sentiment.clone(),
            timestamp: snapshot.timestamp.to_rfc3339(),
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MarketSnapshot> {
                let result_db = diesel::insert_into(market_snapshots::table)
                    .values(&snapshot_db)
                    .returning(MarketSnapshotDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(MarketSnapshot::from(result_db))
            })
            .await
    }
}
