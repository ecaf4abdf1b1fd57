//! # Validation Module
//!
//! Input validation for data crossing into the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog responses (rocket-catalog)                           │
//! │  ├── validate_product (id matches request)                             │
//! │  └── validate_stock (id matches request, amount not negative)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Snapshot load (Cart::from_items)                             │
//! │  └── validate_unique_items (one line per product)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{LineItem, Product, ProductId, StockInfo};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product answer against the id it was requested for.
pub fn validate_product(requested: ProductId, product: &Product) -> ValidationResult<()> {
    if product.id != requested {
        return Err(ValidationError::Mismatch {
            field: "product.id".to_string(),
            expected: requested.to_string(),
            actual: product.id.to_string(),
        });
    }
    Ok(())
}

/// Validates a stock answer against the product it was requested for.
///
/// ## Rules
/// - `stock.product_id` must equal `requested`
/// - `stock.amount` must not be negative
pub fn validate_stock(requested: ProductId, stock: &StockInfo) -> ValidationResult<()> {
    if stock.product_id != requested {
        return Err(ValidationError::Mismatch {
            field: "stock.id".to_string(),
            expected: requested.to_string(),
            actual: stock.product_id.to_string(),
        });
    }

    if stock.amount < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "stock.amount".to_string(),
        });
    }

    Ok(())
}

/// Validates that no two line items share a product id.
pub fn validate_unique_items(items: &[LineItem]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.product_id()) {
            return Err(CoreError::DuplicateLineItem(item.product_id()));
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(id: u32) -> LineItem {
        LineItem::new(
            Product::new(ProductId::new(id), "Tênis", Money::from_cents(100), ""),
            1,
        )
    }

    #[test]
    fn test_validate_product() {
        let product = item(4).product;
        assert!(validate_product(ProductId::new(4), &product).is_ok());
        assert!(matches!(
            validate_product(ProductId::new(5), &product),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_validate_stock() {
        let id = ProductId::new(4);
        assert!(validate_stock(id, &StockInfo::new(id, 0)).is_ok());
        assert!(validate_stock(id, &StockInfo::new(id, 12)).is_ok());
        assert!(matches!(
            validate_stock(id, &StockInfo::new(id, -1)),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
        assert!(matches!(
            validate_stock(id, &StockInfo::new(ProductId::new(5), 3)),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_validate_unique_items() {
        assert!(validate_unique_items(&[]).is_ok());
        assert!(validate_unique_items(&[item(1), item(2), item(3)]).is_ok());
        assert!(matches!(
            validate_unique_items(&[item(1), item(2), item(1)]),
            Err(CoreError::DuplicateLineItem(id)) if id == ProductId::new(1)
        ));
    }
}
