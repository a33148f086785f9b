//! AI analysis error types.

use thiserror::Error;

/// Errors from the narrative analysis path.
///
/// Failures from the model call propagate unchanged to the caller;
/// nothing in this crate retries or falls back.
#[derive(Debug, Error)]
pub enum AiError {
    /// Missing API key for the configured provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider error (HTTP status or error body from the endpoint).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The response did not contain a usable message.
    #[error("Empty response from model")]
    EmptyResponse,

    /// A network error occurred while calling the endpoint.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}
