use super::journal_model::*;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for the append-only journal store.
#[async_trait]
pub trait JournalRepositoryTrait: Send + Sync {
    /// Append an entry. The store assigns id and timestamp.
    async fn add_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry>;
    /// Entries matching every supplied filter, newest first.
    fn query_entries(&self, filters: &JournalFilters) -> Result<Vec<JournalEntry>>;
    /// Entries flagged for follow-up, newest first.
    fn list_follow_ups(&self) -> Result<Vec<JournalEntry>>;
    /// Per-emotional-state rollup over all entries.
    fn emotional_patterns(&self) -> Result<Vec<EmotionalPattern>>;
    /// Per-sentiment rollup over TRADE entries.
    fn strategic_insights(&self) -> Result<Vec<StrategicInsight>>;
}

/// Trait defining the contract for journal service operations.
#[async_trait]
pub trait JournalServiceTrait: Send + Sync {
    /// Validate and append an entry.
    async fn add_entry(&self, entry: NewJournalEntry) -> Result<JournalEntry>;
    fn query_entries(&self, filters: &JournalFilters) -> Result<Vec<JournalEntry>>;
    /// Entries from the last few days (see [`crate::constants::RECENT_JOURNAL_DAYS`]).
    fn recent_entries(&self) -> Result<Vec<JournalEntry>>;
    fn list_follow_ups(&self) -> Result<Vec<JournalEntry>>;
    fn emotional_patterns(&self) -> Result<Vec<EmotionalPattern>>;
    fn strategic_insights(&self) -> Result<Vec<StrategicInsight>>;
}
