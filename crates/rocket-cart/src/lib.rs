//! # rocket-cart: Shopping Cart Store
//!
//! The storefront cart: an ordered list of line items, persisted as a JSON
//! snapshot and kept within catalog stock.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            CartStore                                    │
//! │                                                                         │
//! │   add_product(id)      remove_product(id)      update_product_amount   │
//! │         │                     │                         │               │
//! │         └─────────────────────┼─────────────────────────┘               │
//! │                               ▼                                         │
//! │                 rocket-core::reconcile (pure plans)                     │
//! │                               │                                         │
//! │     ┌─────────────────────────┼─────────────────────────┐               │
//! │     ▼                         ▼                         ▼               │
//! │  ┌──────────┐         ┌───────────────┐         ┌──────────────┐       │
//! │  │ Catalog  │         │ SnapshotStore │         │   Notifier   │       │
//! │  │ product  │         │ load / save   │         │    warn      │       │
//! │  │ stock    │         │ (SQLite/mem)  │         │ (tracing/mem)│       │
//! │  └──────────┘         └───────────────┘         └──────────────┘       │
//! │                                                                         │
//! │   cart() / totals() / subscribe()  ◄── last committed cart             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`error`] - Store errors
//! - [`notifier`] - Notice sinks
//! - [`settings`] - Snapshot key and stock rule
//! - [`store`] - The store and its operations

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod notifier;
pub mod settings;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CartError, CartResult};
pub use notifier::{MemoryNotifier, Notifier, TracingNotifier};
pub use settings::CartSettings;
pub use store::{CartStore, Outcome, SkipReason, UpdateProductAmount};
