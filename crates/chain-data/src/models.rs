//! Chain definitions and transient balance DTOs.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ChainDataError;

/// The base58 alphabet used by Solana addresses (no 0, O, I or l).
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// A supported chain.
///
/// The chain owns its address format and the scaling of raw integer
/// balances into native units: lamports carry 9 decimal places, wei 18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Solana,
    Ethereum,
}

impl Chain {
    /// Identifier used in provider URLs and stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Solana => "solana",
            Chain::Ethereum => "ethereum",
        }
    }

    /// Ticker of the chain's native currency.
    pub fn native_symbol(&self) -> &'static str {
        match self {
            Chain::Solana => "SOL",
            Chain::Ethereum => "ETH",
        }
    }

    /// Decimal places of the chain's smallest raw unit.
    pub fn native_decimals(&self) -> u32 {
        match self {
            Chain::Solana => 9,
            Chain::Ethereum => 18,
        }
    }

    /// Check that an address matches this chain's format.
    ///
    /// Solana addresses are 32-44 base58 characters; Ethereum addresses are
    /// `0x` followed by 40 hex digits. This is a shape check, not a
    /// checksum verification.
    pub fn validate_address(&self, address: &str) -> Result<(), ChainDataError> {
        let ok = match self {
            Chain::Solana => {
                (32..=44).contains(&address.len())
                    && address.chars().all(|c| BASE58_ALPHABET.contains(c))
            }
            Chain::Ethereum => {
                address.len() == 42
                    && address.starts_with("0x")
                    && address[2..].chars().all(|c| c.is_ascii_hexdigit())
            }
        };

        if ok {
            Ok(())
        } else {
            Err(ChainDataError::InvalidAddress {
                chain: self.as_str().to_string(),
                address: address.to_string(),
            })
        }
    }

    /// Scale a raw integer balance string into native units.
    pub fn scale_native(&self, raw: &str) -> Result<Decimal, ChainDataError> {
        scale_raw_amount(raw, self.native_decimals())
    }

    /// All supported chains, for menu listings.
    pub fn all() -> &'static [Chain] {
        &[Chain::Solana, Chain::Ethereum]
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = ChainDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "solana" | "sol" => Ok(Chain::Solana),
            "ethereum" | "eth" => Ok(Chain::Ethereum),
            other => Err(ChainDataError::UnsupportedChain(other.to_string())),
        }
    }
}

/// Convert a provider raw integer amount into a decimal with the given
/// number of fractional places.
pub fn scale_raw_amount(raw: &str, decimals: u32) -> Result<Decimal, ChainDataError> {
    if decimals > 28 {
        return Err(ChainDataError::ValidationFailed {
            message: format!("Unsupported decimal precision: {}", decimals),
        });
    }

    let value: i128 = raw
        .trim()
        .parse()
        .map_err(|_| ChainDataError::ValidationFailed {
            message: format!("Invalid raw amount: {}", raw),
        })?;

    Ok(Decimal::from_i128_with_scale(value, decimals))
}

/// A token balance held by a wallet.
///
/// The provider reports the raw integer amount and the token's decimal
/// places; [`TokenBalance::amount`] is the already scaled value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBalance {
    /// Token identifier: the mint on Solana, the contract on Ethereum.
    pub token_id: String,
    /// Ticker symbol, when the indexer knows it.
    pub symbol: Option<String>,
    /// Display name, when the indexer knows it.
    pub name: Option<String>,
    /// Human-readable amount, scaled by the token's decimals.
    pub amount: Decimal,
    /// The token's decimal places as reported by the provider.
    pub decimals: u32,
}

/// Combined wallet view: native balance plus all token balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletPortfolio {
    pub chain: Chain,
    pub address: String,
    /// Native balance in native units (SOL, ETH).
    pub native_balance: Decimal,
    pub tokens: Vec<TokenBalance>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_chain_round_trip() {
        assert_eq!("solana".parse::<Chain>().unwrap(), Chain::Solana);
        assert_eq!("ETH".parse::<Chain>().unwrap(), Chain::Ethereum);
        assert!("dogechain".parse::<Chain>().is_err());
    }

    #[test]
    fn test_native_decimals() {
        assert_eq!(Chain::Solana.native_decimals(), 9);
        assert_eq!(Chain::Ethereum.native_decimals(), 18);
    }

    #[test]
    fn test_validate_solana_address() {
        let chain = Chain::Solana;
        assert!(chain
            .validate_address("DYw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK")
            .is_ok());
        // 0 is not in the base58 alphabet
        assert!(chain
            .validate_address("0Yw8jCTfwHNRJhhmFcbXvVDTqWMEVFBX6ZKUmG5CNSKK")
            .is_err());
        assert!(chain.validate_address("tooshort").is_err());
    }

    #[test]
    fn test_validate_ethereum_address() {
        let chain = Chain::Ethereum;
        assert!(chain
            .validate_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")
            .is_ok());
        assert!(chain
            .validate_address("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045")
            .is_err());
        assert!(chain
            .validate_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA9604")
            .is_err());
        assert!(chain
            .validate_address("0xZZdA6BF26964aF9D7eEd9e03E53415D37aA96045")
            .is_err());
    }

    #[test]
    fn test_scale_lamports_to_sol() {
        let sol = Chain::Solana.scale_native("1500000000").unwrap();
        assert_eq!(sol, dec!(1.5));
    }

    #[test]
    fn test_scale_wei_to_eth() {
        let eth = Chain::Ethereum.scale_native("2500000000000000000").unwrap();
        assert_eq!(eth, dec!(2.5));
    }

    #[test]
    fn test_scale_rejects_garbage() {
        assert!(scale_raw_amount("not-a-number", 9).is_err());
        assert!(scale_raw_amount("100", 40).is_err());
    }
}
