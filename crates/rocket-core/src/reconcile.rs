//! # Cart Reconciliation
//!
//! Pure decision rules for merging a request into the current cart.
//!
//! ## Where This Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Cart Operation                                   │
//! │                                                                         │
//! │  CartStore (rocket-cart)                                               │
//! │  ├── 1. fetch product / stock from the Catalog       (I/O)             │
//! │  ├── 2. plan_add / plan_update / plan_remove         (THIS MODULE)     │
//! │  │       current Cart + StockInfo ──► Plan                             │
//! │  └── 3. commit the planned Cart or notify            (I/O)             │
//! │                                                                         │
//! │  Plans never mutate their input: they return a brand new Cart, so a    │
//! │  rejected or failed operation has nothing to roll back.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StockCheck::CurrentAmount (default)                                    │
//! │  ───────────────────────────────────                                    │
//! │  add, item present:   reject when line.amount == stock                  │
//! │  add, item absent:    always append with amount 1                       │
//! │  update:              reject when line.amount == stock                  │
//! │                       (compares the CURRENT amount, not current+delta)  │
//! │                                                                         │
//! │  StockCheck::Prospective                                                │
//! │  ───────────────────────                                                │
//! │  add, item present:   reject when line.amount + 1 > stock               │
//! │  add, item absent:    reject when stock < 1                             │
//! │  update, delta > 0:   reject when line.amount + delta > stock           │
//! │  update:              result below 1 is a silent no-op                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CurrentAmount` is what shoppers have always seen: a line that already
//! sits at the stock level is refused, anything else goes through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{Cart, LineItem, Product, ProductId, StockInfo};

// =============================================================================
// Stock Check Mode
// =============================================================================

/// Which stock rule the planners apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockCheck {
    /// Reject only when the line's current amount equals the stock level.
    #[default]
    CurrentAmount,

    /// Reject when the amount after the change would exceed the stock level.
    Prospective,
}

impl fmt::Display for StockCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockCheck::CurrentAmount => write!(f, "current_amount"),
            StockCheck::Prospective => write!(f, "prospective"),
        }
    }
}

impl FromStr for StockCheck {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "current_amount" | "current" | "legacy" => Ok(StockCheck::CurrentAmount),
            "prospective" | "strict" => Ok(StockCheck::Prospective),
            other => Err(ValidationError::InvalidFormat {
                field: "stock_check".to_string(),
                reason: format!(
                    "unknown mode '{}', expected current_amount or prospective",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Plans
// =============================================================================

/// Result of planning an add-to-cart.
#[derive(Debug, Clone, PartialEq)]
pub enum AddPlan {
    /// Product not yet in cart: commit this cart (new line appended, amount 1).
    Append(Cart),

    /// Product already in cart and below the limit: increment by one through
    /// the update path, which re-checks stock on its own.
    Increment,

    /// Refused by the stock rule.
    OutOfStock { current: i64, available: i64 },
}

/// Result of planning an amount change.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatePlan {
    /// No line for this product. Silent no-op.
    NotInCart,

    /// The line's amount is already zero or below. Silent no-op.
    NonPositive,

    /// The change would leave the line below one unit. Silent no-op
    /// (`StockCheck::Prospective` only).
    BelowMinimum { current: i64, requested: i64 },

    /// Refused by the stock rule.
    OutOfStock { current: i64, available: i64 },

    /// Commit this cart; the line now holds `amount`.
    Apply { cart: Cart, amount: i64 },
}

// =============================================================================
// Planners
// =============================================================================

/// Plans adding one unit of `product`.
///
/// ## Example
/// ```rust
/// use rocket_core::reconcile::{plan_add, AddPlan, StockCheck};
/// use rocket_core::{Cart, Money, Product, ProductId, StockInfo};
///
/// let product = Product::new(ProductId::new(1), "Tênis", Money::from_cents(17990), "");
/// let stock = StockInfo::new(ProductId::new(1), 5);
///
/// match plan_add(&Cart::new(), &product, &stock, StockCheck::CurrentAmount) {
///     AddPlan::Append(cart) => assert_eq!(cart.items()[0].amount, 1),
///     other => panic!("unexpected plan {:?}", other),
/// }
/// ```
pub fn plan_add(cart: &Cart, product: &Product, stock: &StockInfo, check: StockCheck) -> AddPlan {
    match cart.find(product.id) {
        Some(line) => {
            let refused = match check {
                StockCheck::CurrentAmount => line.amount == stock.amount,
                StockCheck::Prospective => line.amount.saturating_add(1) > stock.amount,
            };

            if refused {
                AddPlan::OutOfStock {
                    current: line.amount,
                    available: stock.amount,
                }
            } else {
                AddPlan::Increment
            }
        }
        None => {
            if check == StockCheck::Prospective && stock.amount < 1 {
                return AddPlan::OutOfStock {
                    current: 0,
                    available: stock.amount,
                };
            }

            AddPlan::Append(cart.appended(LineItem::new(product.clone(), 1)))
        }
    }
}

/// Plans adding `delta` to the existing line for `product_id`.
///
/// `delta` is relative: `2` means "two more", `-1` means "one fewer".
pub fn plan_update(
    cart: &Cart,
    product_id: ProductId,
    delta: i64,
    stock: &StockInfo,
    check: StockCheck,
) -> UpdatePlan {
    let Some(line) = cart.find(product_id) else {
        return UpdatePlan::NotInCart;
    };

    if line.amount <= 0 {
        return UpdatePlan::NonPositive;
    }

    // No stock level can cover an amount past i64::MAX.
    let Some(next) = line.amount.checked_add(delta) else {
        return UpdatePlan::OutOfStock {
            current: line.amount,
            available: stock.amount,
        };
    };

    match check {
        StockCheck::CurrentAmount => {
            if stock.amount == line.amount {
                return UpdatePlan::OutOfStock {
                    current: line.amount,
                    available: stock.amount,
                };
            }
        }
        StockCheck::Prospective => {
            if delta > 0 && next > stock.amount {
                return UpdatePlan::OutOfStock {
                    current: line.amount,
                    available: stock.amount,
                };
            }
            if next < 1 {
                return UpdatePlan::BelowMinimum {
                    current: line.amount,
                    requested: next,
                };
            }
        }
    }

    UpdatePlan::Apply {
        cart: cart.mapped(product_id, |item| item.with_amount(next)),
        amount: next,
    }
}

/// Plans removing the line for `product_id`.
///
/// Always yields a cart (the same contents when the product is absent), so
/// removing twice is the same as removing once.
pub fn plan_remove(cart: &Cart, product_id: ProductId) -> Cart {
    cart.without(product_id)
}

// =============================================================================
// Unit Tests
// =============================================================================
