pub mod journal_model;
pub mod journal_service;
pub mod journal_traits;


pub use journal_model::*;
pub use journal_service::JournalService;
pub use journal_traits::*;
