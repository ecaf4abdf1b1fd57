//! # Snapshot Repository
//!
//! SQLite-backed key/value storage for persisted snapshots.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore commit                                                       │
//! │       │  put("@RocketShoes:cart", "[{...},{...}]")                      │
//! │       ▼                                                                 │
//! │  INSERT INTO local_storage (key, value, updated_at)                     │
//! │  ON CONFLICT(key) DO UPDATE SET value = excluded.value, ...            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  One row per key, overwritten wholesale. Last write wins.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StorageResult;
use crate::snapshot::SnapshotStore;

/// One row of the `local_storage` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SnapshotRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for the `local_storage` table.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Gets the entry for a key.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - Entry exists
    /// * `Ok(None)` - No entry under this key
    pub async fn get(&self, key: &str) -> StorageResult<Option<SnapshotRecord>> {
        let record = sqlx::query_as::<_, SnapshotRecord>(
            r#"
            SELECT key, value, updated_at
            FROM local_storage
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Inserts or overwrites the entry for a key.
    ///
    /// ## Example
    /// ```rust,ignore
    /// repo.put("@RocketShoes:cart", &cart.to_snapshot_json()?).await?;
    /// ```
    pub async fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        debug!(key = %key, bytes = value.len(), "Writing snapshot");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes the entry for a key.
    ///
    /// ## Returns
    /// `true` if a row was deleted, `false` if the key was absent.
    pub async fn delete(&self, key: &str) -> StorageResult<bool> {
        debug!(key = %key, "Deleting snapshot");

        let result = sqlx::query("DELETE FROM local_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all keys, sorted.
    pub async fn keys(&self) -> StorageResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM local_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}

#[async_trait]
impl SnapshotStore for SnapshotRepository {
    async fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key).await?.map(|record| record.value))
    }

    async fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.put(key, value).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.delete(key).await.map(|_| ())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
