//! # Domain Types
//!
//! Core domain types for the RocketShoes cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    StockInfo    │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (product)   │   │  ..Product      │       │
//! │  │  title          │   │  amount         │   │  amount         │       │
//! │  │  price, extra   │   └─────────────────┘   └────────┬────────┘       │
//! │  │  image          │                                  │                 │
//! │  └─────────────────┘                                  ▼                 │
//! │                                              ┌─────────────────┐        │
//! │                                              │      Cart       │        │
//! │                                              │  Vec<LineItem>  │        │
//! │                                              │  insertion order│        │
//! │                                              └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Compatibility
//! A serialized `Cart` is a bare JSON array of
//! `{ "id", "title", "price", "image", "amount" }` objects. That is the exact
//! snapshot shape the storefront has always persisted, so existing snapshots
//! load without migration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Product Identifier
// =============================================================================

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ProductId)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "product_id".to_string(),
                reason: e.to_string(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as the catalog describes it.
///
/// The cart treats everything except `id` as opaque display data: it copies
/// the attributes into the line item and never interprets them. The price
/// keeps the exact JSON number the catalog sent, and attributes this type
/// does not name ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price as a decimal JSON number. See [`Product::unit_price`].
    #[ts(type = "number")]
    pub price: Number,

    /// Image URL.
    pub image: String,

    /// Any other catalog attributes, kept verbatim.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Builds a product with no extra attributes.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id,
            title: title.into(),
            price: price.to_price(),
            image: image.into(),
            extra: Map::new(),
        }
    }

    /// Unit price in cents, rounded to the nearest cent.
    pub fn unit_price(&self) -> Money {
        Money::from_price(&self.price)
    }
}

// =============================================================================
// Stock
// =============================================================================

/// Available quantity for a product, fetched fresh for every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockInfo {
    /// The product this stock level belongs to.
    #[serde(rename = "id")]
    pub product_id: ProductId,

    /// Units available for purchase.
    pub amount: i64,
}

impl StockInfo {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        StockInfo { product_id, amount }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product attributes, flattened on the wire.
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in cart.
    pub amount: i64,
}

impl LineItem {
    /// Creates a line item for a product with the given amount.
    pub fn new(product: Product, amount: i64) -> Self {
        LineItem { product, amount }
    }

    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price × amount.
    pub fn subtotal(&self) -> Money {
        self.product.unit_price().multiply_quantity(self.amount)
    }

    /// Returns a copy of this line with a different amount.
    pub fn with_amount(&self, amount: i64) -> Self {
        LineItem {
            product: self.product.clone(),
            amount,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The cart: line items in insertion order, unique by product id.
///
/// ## Invariants
/// - No two items share a product id
/// - Insertion order is preserved by every operation
///
/// Mutation happens by building a new `Cart` (see [`crate::reconcile`]); the
/// cart store swaps whole values on commit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart(Vec<LineItem>);

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart(Vec::new())
    }

    /// Builds a cart from items, rejecting duplicate product ids.
    pub fn from_items(items: Vec<LineItem>) -> CoreResult<Self> {
        crate::validation::validate_unique_items(&items)?;
        Ok(Cart(items))
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.0.iter()
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.0
    }

    /// Finds the line item for a product.
    pub fn find(&self, product_id: ProductId) -> Option<&LineItem> {
        self.0.iter().find(|item| item.product_id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all line amounts, saturating at the i64 bounds.
    pub fn total_quantity(&self) -> i64 {
        self.0
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.amount))
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Money {
        self.0.iter().map(LineItem::subtotal).sum()
    }

    /// Returns a new cart with `item` appended at the end.
    pub(crate) fn appended(&self, item: LineItem) -> Self {
        let mut items = self.0.clone();
        items.push(item);
        Cart(items)
    }

    /// Returns a new cart where the matching item is replaced via `f`;
    /// every other item passes through unchanged.
    pub(crate) fn mapped<F>(&self, product_id: ProductId, f: F) -> Self
    where
        F: Fn(&LineItem) -> LineItem,
    {
        Cart(
            self.0
                .iter()
                .map(|item| {
                    if item.product_id() == product_id {
                        f(item)
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        )
    }

    /// Returns a new cart without the matching item.
    pub(crate) fn without(&self, product_id: ProductId) -> Self {
        Cart(
            self.0
                .iter()
                .filter(|item| item.product_id() != product_id)
                .cloned()
                .collect(),
        )
    }

    // =========================================================================
    // Snapshot Codec
    // =========================================================================

    /// Serializes the cart into its persisted snapshot form.
    pub fn to_snapshot_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::MalformedSnapshot(e.to_string()))
    }

    /// Parses a persisted snapshot.
    ///
    /// ## Errors
    /// - `MalformedSnapshot` if the JSON does not describe a cart
    /// - `DuplicateLineItem` if two entries share a product id
    pub fn from_snapshot_json(json: &str) -> CoreResult<Self> {
        let items: Vec<LineItem> =
            serde_json::from_str(json).map_err(|e| CoreError::MalformedSnapshot(e.to_string()))?;
        Cart::from_items(items)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.len(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sneaker(id: u32, cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Tênis {}", id),
            Money::from_cents(cents),
            format!("https://cdn.example.com/{}.jpg", id),
        )
    }

    #[test]
    fn test_product_id_parsing() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::new(7));
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_line_item_wire_shape() {
        let item = LineItem::new(sneaker(1, 17990), 2);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["title"], "Tênis 1");
        assert_eq!(value["price"], 179.9);
        assert_eq!(value["amount"], 2);
        assert!(value.get("product").is_none());
    }

    #[test]
    fn test_stock_info_wire_shape() {
        let stock: StockInfo = serde_json::from_str(r#"{"id":3,"amount":5}"#).unwrap();
        assert_eq!(stock, StockInfo::new(ProductId::new(3), 5));
    }

    #[test]
    fn test_snapshot_round_trip_preserves_order() {
        let cart = Cart::from_items(vec![
            LineItem::new(sneaker(3, 13990), 1),
            LineItem::new(sneaker(1, 17990), 4),
            LineItem::new(sneaker(2, 22990), 2),
        ])
        .unwrap();

        let json = cart.to_snapshot_json().unwrap();
        assert!(json.starts_with('['));

        let restored = Cart::from_snapshot_json(&json).unwrap();
        assert_eq!(restored, cart);
        let ids: Vec<u32> = restored.iter().map(|i| i.product_id().get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_snapshot_from_storefront_format() {
        let json = r#"[{"id":1,"title":"Tênis de Caminhada","price":179.9,"image":"a.jpg","amount":2}]"#;
        let cart = Cart::from_snapshot_json(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].amount, 2);
        assert_eq!(cart.items()[0].product.unit_price().cents(), 17990);
        assert_eq!(cart.to_snapshot_json().unwrap(), json);
    }

    #[test]
    fn test_snapshot_keeps_exact_price_and_extra_attributes() {
        let json = r#"[{"id":1,"title":"a","price":19.999,"image":"x","color":"red","sizes":[38,39],"amount":1}]"#;
        let cart = Cart::from_snapshot_json(json).unwrap();

        let product = &cart.items()[0].product;
        assert_eq!(product.price.as_f64(), Some(19.999));
        assert_eq!(product.extra["color"], "red");
        assert_eq!(product.extra["sizes"], serde_json::json!([38, 39]));

        let restored = Cart::from_snapshot_json(&cart.to_snapshot_json().unwrap()).unwrap();
        assert_eq!(restored, cart);
        let value: Value = serde_json::from_str(&cart.to_snapshot_json().unwrap()).unwrap();
        assert_eq!(value[0]["price"], serde_json::json!(19.999));
        assert_eq!(value[0]["color"], "red");
        assert_eq!(value[0]["amount"], 1);
    }

    #[test]
    fn test_totals_saturate_on_extreme_amounts() {
        let cart = Cart::from_items(vec![
            LineItem::new(sneaker(1, 17990), i64::MAX),
            LineItem::new(sneaker(2, 13990), i64::MAX),
        ])
        .unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.total_quantity, i64::MAX);
        assert_eq!(totals.total, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_malformed_snapshot_rejected() {
        assert!(matches!(
            Cart::from_snapshot_json("{not json"),
            Err(CoreError::MalformedSnapshot(_))
        ));
        assert!(matches!(
            Cart::from_snapshot_json(r#"{"id":1}"#),
            Err(CoreError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn test_duplicate_snapshot_rejected() {
        let item = LineItem::new(sneaker(1, 100), 1);
        let json = serde_json::to_string(&vec![item.clone(), item]).unwrap();
        assert!(matches!(
            Cart::from_snapshot_json(&json),
            Err(CoreError::DuplicateLineItem(_))
        ));
    }

    #[test]
    fn test_totals() {
        let cart = Cart::from_items(vec![
            LineItem::new(sneaker(1, 17990), 2),
            LineItem::new(sneaker(2, 13990), 1),
        ])
        .unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.total.cents(), 49970);
        assert_eq!(totals.total.to_string(), "R$ 499,70");
    }
}
