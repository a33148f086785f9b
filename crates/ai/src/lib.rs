//! Narrative portfolio analysis for coinfolio.
//!
//! This crate packages a portfolio valuation and the latest market
//! snapshot into one of four prompt templates, sends it to a
//! chat-completions endpoint, and hands the model's free-text response
//! back verbatim. No parsing, validation or structuring of the output
//! happens anywhere in here; the response is an opaque string
//! end-to-end.
//!
//! # Architecture
//!
//! - `providers`: the [`ChatProvider`] trait, the OpenAI-compatible HTTP
//!   implementation and a canned provider for tests
//! - `analyst`: the [`NarrativeAnalyst`] and its prompt templates
//! - `error`: AI-specific error types

pub mod analyst;
pub mod error;
pub mod providers;

pub use analyst::NarrativeAnalyst;
pub use error::AiError;
pub use providers::{CannedChatProvider, ChatProvider, OpenAiChatProvider};
