//! On-chain balance access for coinfolio.
//!
//! This crate owns everything that talks to the wallet indexing provider:
//! the [`BalanceProvider`] trait, the Moralis-style implementation, the
//! [`Chain`] definitions (address format, native decimals) and the transient
//! balance DTOs. Raw integer balances from the provider are converted here
//! into human-readable decimal amounts; nothing downstream ever sees raw
//! units.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::ChainDataError;
pub use models::{Chain, TokenBalance, WalletPortfolio};
pub use provider::{BalanceProvider, MoralisProvider};
