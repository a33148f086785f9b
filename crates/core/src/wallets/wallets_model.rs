//! Tracked wallet domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coinfolio_chain_data::Chain;

/// An on-chain wallet the user follows. The address is the natural key;
/// wallets are added and removed, never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedWallet {
    pub address: String,
    pub chain: Chain,
    pub label: Option<String>,
    pub tracked_since: DateTime<Utc>,
}

impl TrackedWallet {
    /// Label when set, otherwise the address itself. Used in menus.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.address)
    }
}

/// Input for tracking a new wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    pub address: String,
    pub chain: Chain,
    pub label: Option<String>,
}
