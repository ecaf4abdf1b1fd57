//! # Catalog Error Types
//!
//! Error types for product and stock lookups.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  NotFound               │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  Status                 │ │
//! │  │  SeedLoadFailed │  │  Offline        │  │  Decode / Invalid       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Every one of these ends the same way inside a cart operation:         │
//! │  logged with detail, shopper sees the operation's generic notice.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rocket_core::{ProductId, ValidationError};
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog error type covering all lookup failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid catalog configuration.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Invalid catalog base URL.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to read or parse a seed document.
    #[error("Failed to load catalog seed: {0}")]
    SeedLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request could not be sent or the connection broke.
    #[error("Catalog request failed: {0}")]
    Request(String),

    /// Request exceeded the configured timeout.
    #[error("Catalog request timed out")]
    Timeout,

    /// Catalog switched offline (in-memory catalog only).
    #[error("Catalog is offline")]
    Offline,

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The catalog has no such resource.
    #[error("{resource} not found for product {id}")]
    NotFound { resource: &'static str, id: ProductId },

    /// Non-success HTTP status other than 404.
    #[error("Catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Body could not be decoded.
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    /// Body decoded but disagrees with the request.
    #[error("Invalid catalog response: {0}")]
    Invalid(#[from] ValidationError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::SeedLoadFailed(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::SeedLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CatalogError {
    /// Returns true if repeating the same request could succeed.
    ///
    /// ## Retryable Errors
    /// - Transport failures and timeouts
    /// - 5xx responses
    /// - Offline catalog
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Request(_) | CatalogError::Timeout | CatalogError::Offline => true,
            CatalogError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidConfig(_)
                | CatalogError::InvalidUrl(_)
                | CatalogError::SeedLoadFailed(_)
        )
    }
}
