//! Market data access for coinfolio.
//!
//! This crate owns everything that talks to the external market data
//! provider: the [`PriceProvider`] trait, the CoinMarketCap-style
//! implementation, and the transient quote DTOs it produces. Nothing in
//! here is persisted; the storage crate owns durable state.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::CoinQuote;
pub use provider::{CoinMarketCapProvider, PriceProvider};
