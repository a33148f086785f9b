//! Database models for the trading journal.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinfolio_core::journal::{
    EmotionalState, EntryCategory, JournalEntry, MarketSentiment, TradeDetail,
};

use crate::utils::{parse_datetime_tolerant, parse_decimal_tolerant, parse_side_tolerant};

/// Database model for one journal entry. Rows are inserted once and
/// never updated or deleted.
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
#[diesel(table_name = crate::schema::journal_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryDB {
    pub id: String,
    pub timestamp: String,
    pub category: String,
    pub coin_id: Option<i64>,
    pub trade_side: Option<String>,
    pub trade_amount: Option<String>,
    pub trade_price: Option<String>,
    pub emotional_state: String,
    pub confidence: i32,
    pub market_sentiment: String,
    pub entry_text: String,
    pub lessons_learned: Option<String>,
    pub follow_up_needed: bool,
    /// JSON array of tag strings.
    pub tags: String,
}

// Conversion to domain models
impl From<JournalEntryDB> for JournalEntry {
    fn from(db: JournalEntryDB) -> Self {
        let category = db.category.parse::<EntryCategory>().unwrap_or_else(|e| {
            log::error!("Failed to parse journal category: {}", e);
            EntryCategory::Reflection
        });

        let emotional_state = db
            .emotional_state
            .parse::<EmotionalState>()
            .unwrap_or_else(|e| {
                log::error!("Failed to parse emotional state: {}", e);
                EmotionalState::Neutral
            });

        let market_sentiment = db
            .market_sentiment
            .parse::<MarketSentiment>()
            .unwrap_or_else(|e| {
                log::error!("Failed to parse market sentiment: {}", e);
                MarketSentiment::Neutral
            });

        // A TRADE entry carries its detail in three nullable columns.
        let trade = match (&db.trade_side, &db.trade_amount, &db.trade_price) {
            (Some(side), Some(amount), Some(price)) => Some(TradeDetail {
                side: parse_side_tolerant(side),
                amount: parse_decimal_tolerant(amount, "trade_amount"),
                price: parse_decimal_tolerant(price, "trade_price"),
            }),
            _ => None,
        };

        let tags: Vec<String> = serde_json::from_str(&db.tags).unwrap_or_else(|e| {
            log::error!("Failed to parse journal tags '{}': {}", db.tags, e);
            Vec::new()
        });

        Self {
            id: db.id,
            timestamp: parse_datetime_tolerant(&db.timestamp, "timestamp"),
            category,
            coin_id: db.coin_id.map(|id| id as u64),
            trade,
            emotional_state,
            confidence: db.confidence.clamp(1, 5) as u8,
            market_sentiment,
            text: db.entry_text,
            lessons_learned: db.lessons_learned,
            follow_up_needed: db.follow_up_needed,
            tags,
        }
    }
}
