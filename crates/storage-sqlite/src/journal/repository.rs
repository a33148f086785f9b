use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use coinfolio_core::journal::{
    EmotionalPattern, EmotionalState, EntryCategory, JournalEntry, JournalFilters,
    JournalRepositoryTrait, MarketSentiment, NewJournalEntry, StrategicInsight,
};
use coinfolio_core::portfolio::TradeSide;
use coinfolio_core::Result;

use super::model::JournalEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::journal_entries;

pub struct JournalRepository {
    pool: DbPool,
    writer: WriteHandle,
}

impl JournalRepository {
    pub fn new(pool: DbPool, writer: WriteHandle) -> Self {
        JournalRepository { pool, writer }
    }
}

#[async_trait]
impl JournalRepositoryTrait for JournalRepository {
    async fn add_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry> {
        let tags = serde_json::to_string(&entry.tags)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let entry_db = JournalEntryDB {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            category: entry.category.as_str().to_string(),
            coin_id: entry.coin_id.map(|id| id as i64),
            trade_side: entry.trade.as_ref().map(|t| t.side.as_str().to_string()),
            trade_amount: entry.trade.as_ref().map(|t| t.amount.to_string()),
            trade_price: entry.trade.as_ref().map(|t| t.price.to_string()),
            emotional_state: entry.emotional_state.as_str().to_string(),
            confidence: i32::from(entry.confidence),
            market_sentiment: entry.market_sentiment.as_str().to_string(),
            entry_text: entry.text,
            lessons_learned: entry.lessons_learned,
            follow_up_needed: entry.follow_up_needed,
            tags,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<JournalEntry> {
                let result_db = diesel::insert_into(journal_entries::table)
                    .values(&entry_db)
                    .returning(JournalEntryDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(JournalEntry::from(result_db))
            })
            .await
    }

    fn query_entries(&self, filters: &JournalFilters) -> Result<Vec<JournalEntry>> {
        let mut conn = get_connection(&self.pool)?;

        // Filters compose conjunctively; an absent filter adds nothing.
        // Timestamps are RFC 3339 UTC text, so string comparison matches
        // chronological order.
        let mut query = journal_entries::table.into_boxed();

        if let Some(start_date) = filters.start_date {
            query = query.filter(journal_entries::timestamp.ge(start_date.to_rfc3339()));
        }
        if let Some(end_date) = filters.end_date {
            query = query.filter(journal_entries::timestamp.le(end_date.to_rfc3339()));
        }
        if let Some(category) = filters.category {
            query = query.filter(journal_entries::category.eq(category.as_str()));
        }
        if let Some(coin_id) = filters.coin_id {
            query = query.filter(journal_entries::coin_id.eq(coin_id as i64));
        }
        if let Some(state) = filters.emotional_state {
            query = query.filter(journal_entries::emotional_state.eq(state.as_str()));
        }

        let entries_db = query
            .order(journal_entries::timestamp.desc())
            .load::<JournalEntryDB>(&mut conn)
            .into_core()?;

        Ok(entries_db.into_iter().map(JournalEntry::from).collect())
    }

    fn list_follow_ups(&self) -> Result<Vec<JournalEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let entries_db = journal_entries::table
            .filter(journal_entries::follow_up_needed.eq(true))
            .order(journal_entries::timestamp.desc())
            .load::<JournalEntryDB>(&mut conn)
            .into_core()?;
        Ok(entries_db.into_iter().map(JournalEntry::from).collect())
    }

    fn emotional_patterns(&self) -> Result<Vec<EmotionalPattern>> {
        let entries = self.query_entries(&JournalFilters::none())?;

        let mut patterns: Vec<EmotionalPattern> = EmotionalState::all()
            .iter()
            .filter_map(|state| {
                let group: Vec<&JournalEntry> = entries
                    .iter()
                    .filter(|e| e.emotional_state == *state)
                    .collect();
                if group.is_empty() {
                    return None;
                }

                let confidence_sum: i64 =
                    group.iter().map(|e| i64::from(e.confidence)).sum();
                let trades = group.iter().filter(|e| e.trade.is_some()).count();
                let buys = group
                    .iter()
                    .filter(|e| {
                        e.trade.as_ref().is_some_and(|t| t.side == TradeSide::Buy)
                    })
                    .count();

                Some(EmotionalPattern {
                    emotional_state: *state,
                    count: group.len() as i64,
                    // Ratio over TRADE entries only; a state with no
                    // trades has no ratio rather than a misleading zero.
                    buy_ratio: (trades > 0).then(|| buys as f64 / trades as f64),
                    avg_confidence: confidence_sum as f64 / group.len() as f64,
                })
            })
            .collect();
        patterns.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(patterns)
    }

    fn strategic_insights(&self) -> Result<Vec<StrategicInsight>> {
        let trades = self.query_entries(&JournalFilters::category(EntryCategory::Trade))?;

        let mut insights: Vec<StrategicInsight> = MarketSentiment::all()
            .iter()
            .filter_map(|sentiment| {
                let group: Vec<&JournalEntry> = trades
                    .iter()
                    .filter(|e| e.market_sentiment == *sentiment)
                    .collect();
                if group.is_empty() {
                    return None;
                }

                let confidence_sum: i64 =
                    group.iter().map(|e| i64::from(e.confidence)).sum();
                let mut tags: Vec<String> = Vec::new();
                for entry in &group {
                    for tag in &entry.tags {
                        if !tags.contains(tag) {
                            tags.push(tag.clone());
                        }
                    }
                }

                Some(StrategicInsight {
                    category: EntryCategory::Trade,
                    market_sentiment: *sentiment,
                    count: group.len() as i64,
                    avg_confidence: confidence_sum as f64 / group.len() as f64,
                    common_tags: (!tags.is_empty()).then(|| tags.join(", ")),
                })
            })
            .collect();
        insights.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(insights)
    }
}
