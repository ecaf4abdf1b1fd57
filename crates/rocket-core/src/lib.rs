//! # rocket-core: Pure Cart Logic for RocketShoes
//!
//! This crate is the **heart** of the RocketShoes cart. It contains the cart
//! types and the reconciliation rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      RocketShoes Cart Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                Storefront / CLI (display layer)                 │   │
//! │  │      Product list ──► Add button ──► Cart page ──► +/- / remove │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                rocket-cart (CartStore + Notifier)               │   │
//! │  └──────┬───────────────────────┬───────────────────────┬──────────┘   │
//! │         │                       │                       │              │
//! │  ┌──────▼─────────┐  ┌──────────▼────────────┐  ┌───────▼─────────┐   │
//! │  │ rocket-catalog │  │ ★ rocket-core ★       │  │ rocket-storage  │   │
//! │  │ product/stock  │  │ (THIS CRATE)          │  │ cart snapshot   │   │
//! │  └────────────────┘  │ types • money         │  └─────────────────┘   │
//! │                      │ reconcile • notice    │                         │
//! │                      │ NO I/O • PURE         │                         │
//! │                      └───────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, StockInfo, LineItem, Cart and the snapshot codec
//! - [`money`] - Money type with saturating integer arithmetic
//! - [`reconcile`] - Add / update / remove planning against stock
//! - [`notice`] - Shopper-facing messages
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rocket_core::reconcile::{plan_add, AddPlan, StockCheck};
//! use rocket_core::{Cart, Money, Product, ProductId, StockInfo};
//!
//! let product = Product::new(
//!     ProductId::new(1),
//!     "Tênis de Caminhada Leve Confortável",
//!     Money::from_cents(17990),
//!     "https://cdn.example.com/1.jpg",
//! );
//!
//! let plan = plan_add(&Cart::new(), &product, &StockInfo::new(product.id, 3), StockCheck::default());
//! let AddPlan::Append(cart) = plan else { unreachable!() };
//! assert_eq!(cart.total().to_string(), "R$ 179,90");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod notice;
pub mod reconcile;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use notice::CartNotice;
pub use reconcile::StockCheck;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the storefront has always used for the cart snapshot.
pub const DEFAULT_SNAPSHOT_KEY: &str = "@RocketShoes:cart";
