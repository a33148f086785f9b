//! SQLite storage implementation for the trading journal.

mod model;
mod repository;

pub use model::JournalEntryDB;
pub use repository::JournalRepository;
