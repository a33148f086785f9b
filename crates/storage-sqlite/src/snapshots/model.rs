//! Database models for global market snapshots.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinfolio_core::market::MarketSnapshot;

use crate::utils::{parse_datetime_tolerant, parse_decimal_tolerant};

/// Database model for one market snapshot row.
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
#[diesel(table_name = crate::schema::market_snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshotDB {
    pub id: String,
    pub total_market_cap: String,
    pub btc_dominance: String,
    pub sentiment: String,
    pub timestamp: String,
}

// Conversion to domain models
impl From<MarketSnapshotDB> for MarketSnapshot {
    fn from(db: MarketSnapshotDB) -> Self {
        Self {
            total_market_cap: parse_decimal_tolerant(&db.total_market_cap, "total_market_cap"),
            btc_dominance: parse_decimal_tolerant(&db.btc_dominance, "btc_dominance"),
            sentiment: db.sentiment,
            timestamp: parse_datetime_tolerant(&db.timestamp, "timestamp"),
        }
    }
}
