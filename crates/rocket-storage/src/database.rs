//! # Snapshot Database
//!
//! Opens the SQLite file that backs the `local_storage` table.
//!
//! ```text
//! DbConfig::new("cart.db")          DbConfig::in_memory()
//!        │                                   │
//!        └──────────► Database::new ◄────────┘
//!                          │  connect, apply embedded schema
//!                          ▼
//!                  db.snapshots()  ──► SnapshotRepository
//! ```
//!
//! The schema ships inside the binary (`migrations/sqlite/*.sql`) and is
//! brought up to date every time a database opens. New schema changes go in
//! a new numbered file; applied files are never edited.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::repository::snapshot::SnapshotRepository;

static SCHEMA: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Where the snapshot database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A file, created on first open. Its directory must exist.
    File(PathBuf),

    /// A private in-memory database that disappears with its pool.
    Memory,
}

/// How to open the snapshot database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub location: DbLocation,

    /// Pool size for file databases. In-memory databases always use one
    /// connection, since each connection to `:memory:` sees its own data.
    pub max_connections: u32,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            max_connections: 2,
        }
    }

    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            max_connections: 1,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// Handle to an open snapshot database. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database and applies pending schema.
    ///
    /// File databases run in WAL mode, so a reader in another process does
    /// not block the cart's writes.
    pub async fn new(config: DbConfig) -> StorageResult<Self> {
        let pool = match &config.location {
            DbLocation::File(path) => {
                info!(path = %path.display(), "Opening snapshot database");
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal);

                SqlitePoolOptions::new()
                    .max_connections(config.max_connections.max(1))
                    .connect_with(options)
                    .await
            }
            DbLocation::Memory => {
                debug!("Opening in-memory snapshot database");
                let options = SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

                // the data lives only as long as its single connection
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
            }
        }
        .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        SCHEMA.run(&pool).await?;
        debug!(migrations = SCHEMA.migrations.len(), "Snapshot schema ready");

        Ok(Database { pool })
    }

    /// Key/value access to the `local_storage` table.
    pub fn snapshots(&self) -> SnapshotRepository {
        SnapshotRepository::new(self.pool.clone())
    }

    /// Closes the pool. Later repository calls fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing snapshot database");
        self.pool.close().await;
    }
}
