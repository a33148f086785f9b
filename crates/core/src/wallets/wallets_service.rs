//! Wallet service: address validation, verification and balance queries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;

use coinfolio_chain_data::{BalanceProvider, Chain, TokenBalance, WalletPortfolio};

use super::wallets_model::*;
use super::wallets_traits::{WalletRepositoryTrait, WalletServiceTrait};
use crate::Result;

/// Service for tracked wallets.
///
/// Adding a wallet verifies the address with a native-balance lookup
/// before anything is persisted; a failed lookup aborts the add and
/// leaves no partial state behind.
pub struct WalletService {
    wallets: Arc<dyn WalletRepositoryTrait>,
    balances: Arc<dyn BalanceProvider>,
}

impl WalletService {
    pub fn new(
        wallets: Arc<dyn WalletRepositoryTrait>,
        balances: Arc<dyn BalanceProvider>,
    ) -> Self {
        Self { wallets, balances }
    }
}

#[async_trait]
impl WalletServiceTrait for WalletService {
    async fn add_wallet(&self, new_wallet: NewWallet) -> Result<TrackedWallet> {
        new_wallet.chain.validate_address(&new_wallet.address)?;

        // Verification call. Errors here abort the add before any write.
        let balance = self
            .balances
            .native_balance(new_wallet.chain, &new_wallet.address)
            .await?;

        debug!(
            "Verified {} wallet {} ({} {})",
            new_wallet.chain,
            new_wallet.address,
            balance,
            new_wallet.chain.native_symbol()
        );

        self.wallets
            .add_wallet(TrackedWallet {
                address: new_wallet.address,
                chain: new_wallet.chain,
                label: new_wallet.label,
                tracked_since: Utc::now(),
            })
            .await
    }

    fn list_wallets(&self) -> Result<Vec<TrackedWallet>> {
        self.wallets.list_wallets()
    }

    async fn remove_wallet(&self, address: &str) -> Result<()> {
        self.wallets.remove_wallet(address).await
    }

    async fn check_balances(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<(Decimal, Vec<TokenBalance>)> {
        let native = self.balances.native_balance(chain, address).await?;
        let tokens = self.balances.token_balances(chain, address).await?;
        Ok((native, tokens))
    }

    async fn wallet_portfolio(&self, chain: Chain, address: &str) -> Result<WalletPortfolio> {
        Ok(self.balances.portfolio(chain, address).await?)
    }
}
