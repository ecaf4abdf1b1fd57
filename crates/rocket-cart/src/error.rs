//! # Cart Store Errors
//!
//! Errors from opening a store and from the commit step.
//!
//! Only [`CartStore::open`](crate::CartStore::open) returns these to a caller.
//! Inside an operation they are logged and turned into a
//! [`CartNotice`](rocket_core::CartNotice).

use rocket_core::CoreError;
use rocket_storage::StorageError;
use thiserror::Error;

/// Cart store error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// Store settings are unusable.
    #[error("Invalid cart settings: {0}")]
    InvalidSettings(String),

    /// Snapshot storage failed.
    #[error("Snapshot storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart could not be encoded as a snapshot.
    #[error("Snapshot encoding error: {0}")]
    Snapshot(#[from] CoreError),
}

/// Result type alias for cart store operations.
pub type CartResult<T> = Result<T, CartError>;
