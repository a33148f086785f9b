//! Error types for the chain data crate.

use thiserror::Error;

/// Errors that can occur while querying the wallet indexing provider.
///
/// No retries happen here; failures surface to the caller with the
/// provider's message embedded where one exists.
#[derive(Error, Debug)]
pub enum ChainDataError {
    /// The address does not match the chain's expected format.
    #[error("Invalid {chain} address: {address}")]
    InvalidAddress {
        /// The chain the address was validated against
        chain: String,
        /// The offending address
        address: String,
    },

    /// The chain identifier is not one of the supported chains.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

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

    /// A provider-specific error occurred.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ChainDataError::InvalidAddress {
            chain: "solana".to_string(),
            address: "0xdeadbeef".to_string(),
        };
        assert_eq!(format!("{}", error), "Invalid solana address: 0xdeadbeef");

        let error = ChainDataError::UnsupportedChain("dogechain".to_string());
        assert_eq!(format!("{}", error), "Unsupported chain: dogechain");
    }
}
