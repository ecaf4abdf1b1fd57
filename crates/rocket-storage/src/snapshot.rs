//! # Snapshot Store
//!
//! The seam between the cart and wherever its snapshot lives.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SnapshotStore implementations                      │
//! │                                                                         │
//! │  trait SnapshotStore                                                   │
//! │  ├── load(key)          → Option<String>                               │
//! │  ├── save(key, value)   → overwrite wholesale                          │
//! │  └── remove(key)                                                       │
//! │         │                                                               │
//! │         ├── SnapshotRepository   SQLite local_storage table            │
//! │         └── MemorySnapshotStore  HashMap, can be told to fail writes   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque text. What goes in them (the cart JSON) is decided by
//! the caller.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StorageError, StorageResult};

/// A keyed text store for persisted snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Reads the entry for `key`, `None` if absent.
    async fn load(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrites the entry for `key`.
    async fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes the entry for `key`. Absent keys are not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Process-local snapshot store.
///
/// Used by tests and by embedders that don't need durability.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: RwLock<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one entry already present.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        MemorySnapshotStore {
            entries: RwLock::new(entries),
            ..Default::default()
        }
    }

    /// When set, `save` and `remove` fail with `StorageError::WriteRejected`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_writable(&self, key: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteRejected {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable(key)?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        debug!(key = %key, bytes = value.len(), "Snapshot saved in memory");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable(key)?;
        self.entries.write().await.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
