//! Database connection management: pool creation, pragmas and embedded
//! migrations.

pub mod write_actor;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::debug;

use coinfolio_core::errors::{DatabaseError, Error, Result};

use crate::errors::IntoCore;

pub use write_actor::{spawn_writer, WriteHandle};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = Arc<Pool<ConnectionManager<SqliteConnection>>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Connection customizer applied to every pooled connection.
///
/// WAL keeps readers unblocked while the writer actor holds its
/// connection; the busy timeout covers the handoff between them.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; \
             PRAGMA foreign_keys = ON; \
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Ensure the database file (and its parent directory) exists.
///
/// Returns the path actually in use. Safe to call repeatedly.
pub fn init(db_path: &str) -> Result<String> {
    let path = Path::new(db_path);

    if !path.exists() {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::Database(DatabaseError::ConnectionFailed(format!(
                        "Failed to create database directory: {}",
                        e
                    )))
                })?;
            }
        }
        fs::File::create(path).map_err(|e| {
            Error::Database(DatabaseError::ConnectionFailed(format!(
                "Failed to create database file: {}",
                e
            )))
        })?;
        debug!("Created database file at {}", db_path);
    }

    Ok(db_path.to_string())
}

/// Build the connection pool for the given database file.
pub fn create_pool(db_path: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .max_size(8)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(|e| Error::Database(DatabaseError::PoolCreationFailed(e.to_string())))?;
    Ok(Arc::new(pool))
}

/// Get a connection from the pool.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection> {
    pool.get().into_core()
}

/// Run all pending embedded migrations.
///
/// Migrations are idempotent (create-if-absent); this must run before
/// any repository is used.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = get_connection(pool)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(DatabaseError::MigrationFailed(e.to_string())))?;
    if !applied.is_empty() {
        debug!("Applied {} migration(s)", applied.len());
    }
    Ok(())
}
