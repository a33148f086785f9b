//! SQLite storage implementation for coinfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `coinfolio-core` and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - Repository implementations for all persistent entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist. All other crates are database-agnostic and work
//! with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Writes funnel through a single writer actor holding one connection;
//! reads go straight to the pool.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod holdings;
pub mod journal;
pub mod snapshots;
pub mod trades;
pub mod wallets;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from coinfolio-core for convenience
pub use coinfolio_core::errors::{DatabaseError, Error, Result};
