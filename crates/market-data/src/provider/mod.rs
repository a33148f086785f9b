//! Price provider trait and implementations.

mod coinmarketcap;
mod traits;

pub use coinmarketcap::CoinMarketCapProvider;
pub use traits::PriceProvider;
