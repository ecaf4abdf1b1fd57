//! # Cart Commands
//!
//! `show`, `add`, `remove` and `update`: each runs at most one store
//! operation and reports the resulting cart.
//!
//! ## Text Output
//! ```text
//! Added product 1 to the cart
//!
//!     ID  PRODUCT                          QTY        SUBTOTAL
//!      1  Tênis de Caminhada Leve            2       R$ 359,80
//!      3  Tênis Adidas Duramo Lite           1       R$ 219,90
//!   ─────────────────────────────────────────────────────────
//!   2 items, 3 units                      TOTAL      R$ 579,70
//! ```

use rocket_cart::{CartStore, Outcome, SkipReason, UpdateProductAmount};
use rocket_core::{Cart, CartTotals, ProductId};
use serde::Serialize;
use std::fmt::Write;
use tracing::debug;

/// Cart contents after a command, with the operation's outcome.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub items: Cart,
    pub totals: CartTotals,
}

impl CartReport {
    fn new(store: &CartStore, outcome: Option<Outcome>) -> Self {
        let items = store.cart();
        let totals = CartTotals::from(&items);
        CartReport {
            outcome,
            items,
            totals,
        }
    }

    /// True when the operation was rejected with a notice.
    pub fn is_rejected(&self) -> bool {
        matches!(self.outcome, Some(Outcome::Rejected(_)))
    }
}

pub fn show(store: &CartStore) -> CartReport {
    debug!("show command");
    CartReport::new(store, None)
}

pub async fn add(store: &CartStore, product_id: ProductId) -> CartReport {
    debug!(product_id = %product_id, "add command");
    let outcome = store.add_product(product_id).await;
    CartReport::new(store, Some(outcome))
}

pub async fn remove(store: &CartStore, product_id: ProductId) -> CartReport {
    debug!(product_id = %product_id, "remove command");
    let outcome = store.remove_product(product_id).await;
    CartReport::new(store, Some(outcome))
}

pub async fn update(store: &CartStore, product_id: ProductId, delta: i64) -> CartReport {
    debug!(product_id = %product_id, delta, "update command");
    let outcome = store
        .update_product_amount(UpdateProductAmount {
            product_id,
            amount: delta,
        })
        .await;
    CartReport::new(store, Some(outcome))
}

// =============================================================================
// Rendering
// =============================================================================

/// One line describing an outcome.
pub fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Appended { product_id } => format!("Added product {} to the cart", product_id),
        Outcome::AmountChanged { product_id, amount } => {
            format!("Product {} amount is now {}", product_id, amount)
        }
        Outcome::Removed {
            product_id,
            present: true,
        } => format!("Removed product {} from the cart", product_id),
        Outcome::Removed {
            product_id,
            present: false,
        } => format!("Product {} was not in the cart", product_id),
        Outcome::Skipped(SkipReason::NotInCart) => "Product is not in the cart; nothing changed".into(),
        Outcome::Skipped(SkipReason::NonPositive) => {
            "Line amount is not positive; nothing changed".into()
        }
        Outcome::Skipped(SkipReason::BelowMinimum) => {
            "Amount cannot go below 1; nothing changed".into()
        }
        Outcome::Rejected(notice) => notice.message().to_string(),
    }
}

/// Renders a report for the terminal.
pub fn render_text(report: &CartReport) -> String {
    let mut out = String::new();

    if let Some(outcome) = &report.outcome {
        let _ = writeln!(out, "{}\n", describe(outcome));
    }

    if report.items.is_empty() {
        out.push_str("  Cart is empty\n");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:>4}  {:<30} {:>5} {:>15}",
        "ID", "PRODUCT", "QTY", "SUBTOTAL"
    );
    for item in &report.items {
        let _ = writeln!(
            out,
            "  {:>4}  {:<30} {:>5} {:>15}",
            item.product_id(),
            truncate(&item.product.title, 30),
            item.amount,
            item.subtotal().to_string()
        );
    }
    let _ = writeln!(out, "  {}", "─".repeat(57));

    let summary = format!(
        "{} {}, {} {}",
        report.totals.item_count,
        plural(report.totals.item_count as i64, "item", "items"),
        report.totals.total_quantity,
        plural(report.totals.total_quantity, "unit", "units"),
    );
    let _ = writeln!(
        out,
        "  {:<36} {:>5} {:>15}",
        summary,
        "TOTAL",
        report.totals.total.to_string()
    );

    out
}

fn plural(count: i64, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max - 1).collect();
        cut.push('…');
        cut
    }
}
