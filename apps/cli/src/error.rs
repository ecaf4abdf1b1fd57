//! # CLI Error Type
//!
//! Everything that can stop the binary before or around a cart operation.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in rocket-cart                            │
//! │                                                                         │
//! │  cart.toml / env ── ConfigParse, InvalidConfig ──┐                     │
//! │  catalog setup ──── Catalog(CatalogError) ───────┤                     │
//! │  SQLite open ────── Storage(StorageError) ───────┼──► CliError ──► exit│
//! │  store open ─────── Cart(CartError) ─────────────┘      code 1         │
//! │                                                                         │
//! │  A rejected cart operation is NOT an error: the store has already      │
//! │  sent the notice, and the command prints the outcome.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rocket_cart::CartError;
use rocket_catalog::CatalogError;
use rocket_storage::StorageError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Component Errors
    // =========================================================================
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    // =========================================================================
    // Output / IO
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output encoding error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Returns true if this error is caused by configuration.
    pub fn is_config_error(&self) -> bool {
        match self {
            CliError::InvalidConfig(_) | CliError::ConfigParse(_) => true,
            CliError::Catalog(e) => e.is_config_error(),
            CliError::Cart(CartError::InvalidSettings(_)) => true,
            _ => false,
        }
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::ConfigSaveFailed(err.to_string())
    }
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
