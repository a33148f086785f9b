use super::wallets_model::*;
use crate::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

use coinfolio_chain_data::{Chain, TokenBalance, WalletPortfolio};

/// Trait defining the contract for wallet repository operations.
#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    /// Insert a wallet row. A duplicate address surfaces the store's
    /// unique-constraint error and leaves the existing row unchanged.
    async fn add_wallet(&self, wallet: TrackedWallet) -> Result<TrackedWallet>;
    fn get_wallet(&self, address: &str) -> Result<Option<TrackedWallet>>;
    fn list_wallets(&self) -> Result<Vec<TrackedWallet>>;
    /// Delete-where-key: removing an untracked address is a no-op.
    async fn remove_wallet(&self, address: &str) -> Result<()>;
}

/// Trait defining the contract for wallet service operations.
#[async_trait]
pub trait WalletServiceTrait: Send + Sync {
    /// Validate the address, verify it with a native-balance lookup, then
    /// persist. Verification failure aborts the add with no partial state.
    async fn add_wallet(&self, new_wallet: NewWallet) -> Result<TrackedWallet>;
    fn list_wallets(&self) -> Result<Vec<TrackedWallet>>;
    async fn remove_wallet(&self, address: &str) -> Result<()>;
    /// Native balance plus token balances for one wallet.
    async fn check_balances(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<(Decimal, Vec<TokenBalance>)>;
    /// Combined wallet view from the indexer.
    async fn wallet_portfolio(&self, chain: Chain, address: &str) -> Result<WalletPortfolio>;
}
