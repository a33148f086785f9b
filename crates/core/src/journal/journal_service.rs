//! Journal service: entry validation and read passthroughs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::debug;
use rust_decimal::Decimal;

use super::journal_model::*;
use super::journal_traits::{JournalRepositoryTrait, JournalServiceTrait};
use crate::constants::RECENT_JOURNAL_DAYS;
use crate::errors::ValidationError;
use crate::Result;

/// Service for the trading journal.
pub struct JournalService {
    journal: Arc<dyn JournalRepositoryTrait>,
}

impl JournalService {
    pub fn new(journal: Arc<dyn JournalRepositoryTrait>) -> Self {
        Self { journal }
    }

    fn validate_entry(&self, entry: &NewJournalEntry) -> Result<()> {
        if !(1..=5).contains(&entry.confidence) {
            return Err(ValidationError::InvalidInput(format!(
                "Confidence must be between 1 and 5, got {}",
                entry.confidence
            ))
            .into());
        }

        if entry.text.trim().is_empty() {
            return Err(ValidationError::MissingField("text".to_string()).into());
        }

        match (&entry.category, &entry.trade) {
            (EntryCategory::Trade, None) => {
                return Err(ValidationError::MissingField("trade".to_string()).into());
            }
            (EntryCategory::Trade, Some(trade)) => {
                if trade.amount <= Decimal::ZERO || trade.price <= Decimal::ZERO {
                    return Err(ValidationError::InvalidInput(
                        "Trade amount and price must be positive".to_string(),
                    )
                    .into());
                }
            }
            _ => {}
        }

        Ok(())
    }
}

#[async_trait]
impl JournalServiceTrait for JournalService {
    async fn add_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry> {
        self.validate_entry(&entry)?;

        let entry = self.journal.add_entry(entry).await?;
        debug!("Added {} journal entry {}", entry.category, entry.id);
        Ok(entry)
    }

    fn query_entries(&self, filters: &JournalFilters) -> Result<Vec<JournalEntry>> {
        self.journal.query_entries(filters)
    }

    fn recent_entries(&self) -> Result<Vec<JournalEntry>> {
        let start_date = Utc::now() - Duration::days(RECENT_JOURNAL_DAYS);
        self.journal.query_entries(&JournalFilters::since(start_date))
    }

    fn list_follow_ups(&self) -> Result<Vec<JournalEntry>> {
        self.journal.list_follow_ups()
    }

    fn emotional_patterns(&self) -> Result<Vec<EmotionalPattern>> {
        self.journal.emotional_patterns()
    }

    fn strategic_insights(&self) -> Result<Vec<StrategicInsight>> {
        self.journal.strategic_insights()
    }
}
