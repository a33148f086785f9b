pub mod market_model;
pub mod market_traits;

pub use market_model::*;
pub use market_traits::*;
