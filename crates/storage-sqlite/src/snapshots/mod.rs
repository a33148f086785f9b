//! SQLite storage implementation for global market snapshots.

mod model;
mod repository;

pub use model::MarketSnapshotDB;
pub use repository::SnapshotRepository;
