//! Database models for tracked wallets.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinfolio_chain_data::Chain;
use coinfolio_core::wallets::TrackedWallet;

use crate::utils::parse_datetime_tolerant;

/// Database model for a tracked wallet. The address is the primary key;
/// rows are inserted and deleted, never updated.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::tracked_wallets)]
#[diesel(primary_key(address))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TrackedWalletDB {
    pub address: String,
    pub chain: String,
    pub label: Option<String>,
    pub tracked_since: String,
}

// Conversion to domain models
impl From<TrackedWalletDB> for TrackedWallet {
    fn from(db: TrackedWalletDB) -> Self {
        let chain = db.chain.parse::<Chain>().unwrap_or_else(|e| {
            // Only Chain::as_str values are ever written here.
            log::error!("Failed to parse stored chain: {}", e);
            Chain::Solana
        });

        Self {
            address: db.address,
            chain,
            label: db.label,
            tracked_since: parse_datetime_tolerant(&db.tracked_since, "tracked_since"),
        }
    }
}

impl From<&TrackedWallet> for TrackedWalletDB {
    fn from(domain: &TrackedWallet) -> Self {
        Self {
            address: domain.address.clone(),
            chain: domain.chain.as_str().to_string(),
            label: domain.label.clone(),
            tracked_since: domain.tracked_since.to_rfc3339(),
        }
    }
}
