pub mod wallets_model;
pub mod wallets_service;
pub mod wallets_traits;


pub use wallets_model::*;
pub use wallets_service::WalletService;
pub use wallets_traits::*;
