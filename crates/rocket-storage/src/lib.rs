//! # rocket-storage: Snapshot Storage for the RocketShoes Cart
//!
//! Persists the cart snapshot: a single keyed text entry that is read once
//! when the cart opens and overwritten wholesale on every committed change.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Snapshot Data Flow                          │
//! │                                                                         │
//! │  CartStore::open / commit                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  rocket-storage (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐                  │   │
//! │  │   │ SnapshotStore │    │ SnapshotRepository │                  │   │
//! │  │   │  (trait)      │◄───│ MemorySnapshotStore│                  │   │
//! │  │   └───────────────┘    └─────────┬──────────┘                  │   │
//! │  │                                  │                              │   │
//! │  │                     ┌────────────▼────────────┐                 │   │
//! │  │                     │ Database (+ schema)     │                 │   │
//! │  │                     └─────────────────────────┘                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file, e.g. ~/.local/share/cart/cart.db                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`snapshot`] - `SnapshotStore` trait and the in-memory store
//! - [`database`] - Opening the SQLite file and applying its schema
//! - [`repository`] - SQLite repositories
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rocket_storage::{Database, DbConfig, SnapshotStore};
//!
//! let db = Database::new(DbConfig::new("cart.db")).await?;
//! let snapshots = db.snapshots();
//! snapshots.save("@RocketShoes:cart", "[]").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod database;
pub mod error;
pub mod repository;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StorageError, StorageResult};
pub use database::{Database, DbConfig, DbLocation};
pub use repository::snapshot::{SnapshotRecord, SnapshotRepository};
pub use snapshot::{MemorySnapshotStore, SnapshotStore};
