//! Database models for the trade ledger.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinfolio_core::portfolio::Trade;

use crate::utils::{parse_datetime_tolerant, parse_decimal_tolerant, parse_side_tolerant};

/// Database model for one ledger row. Rows are inserted once and never
/// updated.
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
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct TradeDB {
    pub id: String,
    pub coin_id: i64,
    pub side: String,
    pub quantity: String,
    pub unit_price: String,
    pub timestamp: String,
    pub notes: Option<String>,
}

// Conversion to domain models
impl From<TradeDB> for Trade {
    fn from(db: TradeDB) -> Self {
        Self {
            id: db.id,
            coin_id: db.coin_id as u64,
            side: parse_side_tolerant(&db.side),
            quantity: parse_decimal_tolerant(&db.quantity, "quantity"),
            unit_price: parse_decimal_tolerant(&db.unit_price, "unit_price"),
            timestamp: parse_datetime_tolerant(&db.timestamp, "timestamp"),
            notes: db.notes,
        }
    }
}
