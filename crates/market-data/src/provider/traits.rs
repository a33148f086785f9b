//! Price provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::CoinQuote;

/// Trait for quote providers.
///
/// Implement this trait to add support for a new market data source.
/// Implementations are constructed once at startup with their API key and
/// injected into services as trait objects; they hold no mutable state.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Look up all coins trading under the given ticker symbol.
    ///
    /// Symbols are not unique across coins, so this can return several
    /// candidates; callers disambiguate by display name and numeric id.
    /// Returns [`MarketDataError::SymbolNotFound`] when nothing matches.
    async fn search_by_symbol(&self, symbol: &str) -> Result<Vec<CoinQuote>, MarketDataError>;

    /// Fetch the quote for a single coin by its provider-assigned id.
    ///
    /// Returns [`MarketDataError::IdNotFound`] when the id is unknown.
    async fn get_by_id(&self, id: u64) -> Result<CoinQuote, MarketDataError>;

    /// Fetch quotes for several coins in one call.
    ///
    /// Ids the provider does not know are silently absent from the result;
    /// callers that care about completeness compare against their input.
    async fn get_by_ids(&self, ids: &[u64]) -> Result<Vec<CoinQuote>, MarketDataError>;
}
