//! # rocket-catalog: Product and Stock Lookups
//!
//! The cart's read-only collaborator for product details and stock levels.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog Seam                                   │
//! │                                                                         │
//! │  CartStore                                                             │
//! │     │  catalog.product(id)   catalog.stock(id)                         │
//! │     ▼                                                                   │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 trait Catalog: Send + Sync                       │  │
//! │  └───────────────┬──────────────────────────────────┬───────────────┘  │
//! │                  │                                  │                   │
//! │  ┌───────────────▼───────────────┐  ┌───────────────▼───────────────┐  │
//! │  │ HttpCatalog                   │  │ InMemoryCatalog               │  │
//! │  │ reqwest, optional timeout     │  │ seed JSON, offline switch     │  │
//! │  │ GET /products/{id}            │  │ request counters              │  │
//! │  │ GET /stock/{id}               │  │                               │  │
//! │  └───────────────────────────────┘  └───────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Base URL and timeout
//! - [`error`] - Catalog error types
//! - [`http`] - REST client
//! - [`memory`] - In-memory catalog

use async_trait::async_trait;
use rocket_core::{Product, ProductId, StockInfo};

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod http;
pub mod memory;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use http::HttpCatalog;
pub use memory::InMemoryCatalog;

// =============================================================================
// Catalog Trait
// =============================================================================

/// Source of product details and current stock.
///
/// Implementations must not cache stock: each call reflects the catalog at
/// the moment of the call.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetches product details.
    async fn product(&self, id: ProductId) -> CatalogResult<Product>;

    /// Fetches the current stock level.
    async fn stock(&self, id: ProductId) -> CatalogResult<StockInfo>;
}
