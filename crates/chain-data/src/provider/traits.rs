//! Balance provider trait definition.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::ChainDataError;
use crate::models::{Chain, TokenBalance, WalletPortfolio};

/// Trait for wallet indexing providers.
///
/// Implementations translate the provider's raw responses into the crate's
/// DTOs; all returned amounts are already scaled to human-readable
/// decimals. Constructed once at startup and injected as trait objects.
#[async_trait]
pub trait BalanceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Fetch a wallet's native-currency balance, in native units.
    async fn native_balance(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<Decimal, ChainDataError>;

    /// Fetch a wallet's token balances.
    async fn token_balances(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<Vec<TokenBalance>, ChainDataError>;

    /// Fetch the combined wallet view (native balance plus tokens) in one
    /// call.
    async fn portfolio(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<WalletPortfolio, ChainDataError>;
}
