//! # Error Types
//!
//! Domain-specific error types for rocket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rocket-core errors (this file)                                        │
//! │  ├── CoreError        - Snapshot and cart shape errors                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rocket-storage errors                                                 │
//! │  └── StorageError     - Snapshot read/write failures                   │
//! │                                                                         │
//! │  rocket-catalog errors                                                 │
//! │  └── CatalogError     - Product / stock fetch failures                 │
//! │                                                                         │
//! │  Cart operations never surface these to callers: they end as a         │
//! │  CartNotice handed to the Notifier.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core cart errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The persisted snapshot is not a valid cart.
    ///
    /// ## When This Occurs
    /// - Snapshot entry was hand-edited or truncated
    /// - Entry was written by something other than the cart store
    ///
    /// The store treats this exactly like an absent snapshot: empty cart.
    #[error("Malformed cart snapshot: {0}")]
    MalformedSnapshot(String),

    /// Two line items share a product id.
    #[error("Duplicate line item for product {0}")]
    DuplicateLineItem(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. a product id that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two values that must agree do not.
    #[error("{field} mismatch: expected {expected}, got {actual}")]
    Mismatch {
        field: String,
        expected: String,
        actual: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
