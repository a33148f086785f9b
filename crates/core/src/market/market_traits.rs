use super::market_model::MarketSnapshot;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for market snapshot storage.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// The most recent snapshot, if any has ever been recorded.
    fn latest_snapshot(&self) -> Result<Option<MarketSnapshot>>;
    /// Insert a snapshot row. This is the external collector's write
    /// path; nothing in the core calls it outside of tests.
    async fn record_snapshot(&self, snapshot: MarketSnapshot) -> Result<MarketSnapshot>;
}
