pub mod portfolio_model;
pub mod portfolio_service;
pub mod portfolio_traits;

#[cfg(test)]
mod portfolio_service_tests;

pub use portfolio_model::*;
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::*;
