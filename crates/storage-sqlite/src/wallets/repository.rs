use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use coinfolio_core::wallets::{TrackedWallet, WalletRepositoryTrait};
use coinfolio_core::Result;

use super::model::TrackedWalletDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::tracked_wallets;

pub struct WalletRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl WalletRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        WalletRepository { pool, writer }
    }
}

#[async_trait]
impl WalletRepositoryTrait for WalletRepository {
    async fn add_wallet(&self, wallet: TrackedWallet) -> Result<TrackedWallet> {
        let wallet_db = TrackedWalletDB::from(&wallet);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TrackedWallet> {
                // A duplicate address trips the primary key and surfaces
                // as a unique-constraint violation, leaving the existing
                // row unchanged.
                let result_db = diesel::insert_into(tracked_wallets::table)
                    .values(&wallet_db)
                    .returning(TrackedWalletDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(TrackedWallet::from(result_db))
            })
            .await
    }

    fn get_wallet(&self, address: &str) -> Result<Option<TrackedWallet>> {
        let mut conn = get_connection(&self.pool)?;
        let wallet_db = tracked_wallets::table
            .find(address)
            .first::<TrackedWalletDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(wallet_db.map(TrackedWallet::from))
    }

    fn list_wallets(&self) -> Result<Vec<TrackedWallet>> {
        let mut conn = get_connection(&self.pool)?;
        let wallets_db = tracked_wallets::table
            .order(tracked_wallets::tracked_since.asc())
            .load::<TrackedWalletDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(wallets_db.into_iter().map(TrackedWallet::from).collect())
    }

    async fn remove_wallet(&self, address: &str) -> Result<()> {
        let address = address.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                // Delete-where-key: zero affected rows is not an error.
                diesel::delete(tracked_wallets::table.find(address))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}
