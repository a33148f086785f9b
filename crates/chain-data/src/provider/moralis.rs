//! Moralis wallet indexer implementation.
//!
//! Per-chain GET endpoints under one gateway:
//! `/{chain}/{address}/balance`, `/{chain}/{address}/tokens` and
//! `/{chain}/{address}/portfolio`, all authenticated with an `X-API-Key`
//! header. The gateway reports balances as raw integer strings; scaling to
//! native units happens here using the chain's decimals.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::errors::ChainDataError;
use crate::models::{scale_raw_amount, Chain, TokenBalance, WalletPortfolio};
use crate::provider::BalanceProvider;

const BASE_URL: &str = "https://wallet-gateway.moralis.io/account";
const PROVIDER_ID: &str = "MORALIS";

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from the /balance endpoint.
#[derive(Debug, Deserialize)]
struct BalanceResponse {
    /// Raw integer balance (lamports / wei) as a string.
    balance: String,
}

/// One token entry from the /tokens endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenItem {
    /// Mint (Solana) or contract (Ethereum) address.
    token_address: String,
    symbol: Option<String>,
    name: Option<String>,
    /// Raw integer amount as a string.
    amount: String,
    decimals: u32,
}

/// Response from the /tokens endpoint.
#[derive(Debug, Deserialize)]
struct TokensResponse {
    #[serde(default)]
    tokens: Vec<TokenItem>,
}

/// Response from the /portfolio endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PortfolioResponse {
    native_balance: BalanceResponse,
    #[serde(default)]
    tokens: Vec<TokenItem>,
}

/// Error body the gateway returns on failures.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

// ============================================================================
// MoralisProvider
// ============================================================================

/// Moralis wallet balance provider.
pub struct MoralisProvider {
    client: Client,
    api_key: String,
}

impl MoralisProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    /// Make a GET request against a per-chain account endpoint.
    async fn fetch(&self, chain: Chain, address: &str, leaf: &str) -> Result<String, ChainDataError> {
        let url = format!("{}/{}/{}/{}", BASE_URL, chain.as_str(), address, leaf);

        debug!("Moralis request: {} {} for {}", chain, leaf, address);

        let response = self
            .client
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChainDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    ChainDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChainDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(message) = error_resp.message {
                    return Err(ChainDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message,
                    });
                }
            }

            return Err(ChainDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        response
            .text()
            .await
            .map_err(|e| ChainDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to read response: {}", e),
            })
    }
}

/// Convert one provider token entry, scaling its raw amount.
fn map_token(item: TokenItem) -> Result<TokenBalance, ChainDataError> {
    let amount = scale_raw_amount(&item.amount, item.decimals)?;

    Ok(TokenBalance {
        token_id: item.token_address,
        symbol: item.symbol,
        name: item.name,
        amount,
        decimals: item.decimals,
    })
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ChainDataError> {
    serde_json::from_str(body).map_err(|e| ChainDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: format!("Failed to parse response: {}", e),
    })
}

#[async_trait]
impl BalanceProvider for MoralisProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn native_balance(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<Decimal, ChainDataError> {
        chain.validate_address(address)?;

        let body = self.fetch(chain, address, "balance").await?;
        let response: BalanceResponse = parse(&body)?;

        chain.scale_native(&response.balance)
    }

    async fn token_balances(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<Vec<TokenBalance>, ChainDataError> {
        chain.validate_address(address)?;

        let body = self.fetch(chain, address, "tokens").await?;
        let response: TokensResponse = parse(&body)?;

        response.tokens.into_iter().map(map_token).collect()
    }

    async fn portfolio(
        &self,
        chain: Chain,
        address: &str,
    ) -> Result<WalletPortfolio, ChainDataError> {
        chain.validate_address(address)?;

        let body = self.fetch(chain, address, "portfolio").await?;
        let response: PortfolioResponse = parse(&body)?;

        let native_balance = chain.scale_native(&response.native_balance.balance)?;
        let tokens = response
            .tokens
            .into_iter()
            .map(map_token)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WalletPortfolio {
            chain,
            address: address.to_string(),
            native_balance,
            tokens,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_response_parsing() {
        let json = r#"{ "balance": "1500000000" }"#;
        let response: BalanceResponse = parse::<BalanceResponse>(json).unwrap();
        assert_eq!(response.balance, "1500000000");
    }

    #[test]
    fn test_tokens_response_parsing_and_scaling() {
        let json = r#"{
            "tokens": [
                {
                    "tokenAddress": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                    "symbol": "USDC",
                    "name": "USD Coin",
                    "amount": "2500000",
                    "decimals": 6
                },
                {
                    "tokenAddress": "So11111111111111111111111111111111111111112",
                    "symbol": null,
                    "name": null,
                    "amount": "1000000000",
                    "decimals": 9
                }
            ]
        }"#;

        let response: TokensResponse = parse(json).unwrap();
        let tokens: Vec<TokenBalance> = response
            .tokens
            .into_iter()
            .map(map_token)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].symbol.as_deref(), Some("USDC"));
        assert_eq!(tokens[0].amount, dec!(2.5));
        assert_eq!(tokens[1].amount, dec!(1));
    }

    #[test]
    fn test_portfolio_response_parsing() {
        let json = r#"{
            "nativeBalance": { "balance": "2500000000000000000" },
            "tokens": []
        }"#;

        let response: PortfolioResponse = parse(json).unwrap();
        let eth = Chain::Ethereum
            .scale_native(&response.native_balance.balance)
            .unwrap();
        assert_eq!(eth, dec!(2.5));
        assert!(response.tokens.is_empty());
    }

    #[test]
    fn test_error_response_parsing() {
        let json = r#"{ "message": "invalid api key" }"#;
        let response: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message.as_deref(), Some("invalid api key"));
    }

    #[tokio::test]
    async fn test_native_balance_rejects_bad_address_before_network() {
        let provider = MoralisProvider::new("test_key".to_string());
        let err = provider
            .native_balance(Chain::Ethereum, "not-an-address")
            .await
            .unwrap_err();
        assert!(matches!(err, ChainDataError::InvalidAddress { .. }));
    }

    #[test]
    fn test_provider_id() {
        let provider = MoralisProvider::new("test_key".to_string());
        assert_eq!(provider.id(), "MORALIS");
    }
}
