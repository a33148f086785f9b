//! Database models for registered coins.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinfolio_core::portfolio::Holding;

use crate::utils::{parse_datetime_tolerant, parse_decimal_tolerant};

/// Database model for a registered coin.
///
/// Prices are stored as text so SQLite never rounds them.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(primary_key(coin_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct HoldingDB {
    pub coin_id: i64,
    pub symbol: String,
    pub name: String,
    pub entry_price: String,
    pub last_price: String,
    pub strategy: Option<String>,
    pub last_updated: String,
}

// Conversion to domain models
impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        Self {
            coin_id: db.coin_id as u64,
            symbol: db.symbol,
            name: db.name,
            entry_price: parse_decimal_tolerant(&db.entry_price, "entry_price"),
            last_price: parse_decimal_tolerant(&db.last_price, "last_price"),
            strategy: db.strategy,
            last_updated: parse_datetime_tolerant(&db.last_updated, "last_updated"),
        }
    }
}

impl From<&Holding> for HoldingDB {
    fn from(domain: &Holding) -> Self {
        Self {
            coin_id: domain.coin_id as i64,
            symbol: domain.symbol.clone(),
            name: domain.name.clone(),
            entry_price: domain.entry_price.to_string(),
            last_price: domain.last_price.to_string(),
            strategy: domain.strategy.clone(),
            last_updated: domain.last_updated.to_rfc3339(),
        }
    }
}
