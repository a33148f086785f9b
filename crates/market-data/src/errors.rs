//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching quotes from the price provider.
///
/// The adapter performs no retries; every failure is surfaced to the
/// caller with the provider's own message embedded where one exists.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol matched no coins at the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No coin exists with the given provider-assigned numeric id.
    #[error("No coin found with id {0}")]
    IdNotFound(u64),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred. Carries the message the
    /// provider returned in its status envelope when available.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that could not be interpreted.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with the provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
