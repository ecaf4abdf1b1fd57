//! # Cart Store
//!
//! Owns the committed cart and runs cart operations.
//!
//! ## Operation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Cart Operation                                │
//! │                                                                         │
//! │  caller ──► add_product(id)                                            │
//! │               │                                                         │
//! │               ▼                                                         │
//! │          gate.lock()  ← one operation at a time per store               │
//! │               │                                                         │
//! │               ▼                                                         │
//! │          Catalog: product(id), stock(id)    ── Err ──► notify, return  │
//! │               │                                                         │
//! │               ▼                                                         │
//! │          plan against the LATEST committed cart                        │
//! │               │                                                         │
//! │       ┌───────┼──────────────┬────────────────┐                        │
//! │       ▼       ▼              ▼                ▼                        │
//! │    no-op   OutOfStock     new Cart        (add) Increment             │
//! │   (silent)  notify           │              = update(id, +1)           │
//! │                              ▼                                          │
//! │                 commit: encode ► snapshots.save ► publish              │
//! │                              │                                          │
//! │                   save Err ──┴──► notify, memory untouched             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//! - The snapshot is written before the new cart becomes visible, so the
//!   in-memory cart never runs ahead of storage.
//! - Every failure path returns before `commit`, so nothing partial is kept.
//! - Operations hold the gate across their catalog fetches. Two adds of the
//!   same product issued together therefore produce two increments.

use rocket_catalog::{Catalog, CatalogError};
use rocket_core::reconcile::{plan_add, plan_remove, plan_update, AddPlan, UpdatePlan};
use rocket_core::{Cart, CartNotice, CartTotals, ProductId};
use rocket_storage::SnapshotStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::error::CartResult;
use crate::notifier::Notifier;
use crate::settings::CartSettings;

// =============================================================================
// Request / Outcome Types
// =============================================================================

/// Arguments of [`CartStore::update_product_amount`].
///
/// `amount` is a delta added to the line's current amount, not a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Why an operation did nothing without notifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The product has no line in the cart.
    NotInCart,
    /// The line's amount is zero or below.
    NonPositive,
    /// The change would take the line below one unit.
    BelowMinimum,
}

/// What an operation did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// A new line was appended with amount 1.
    Appended { product_id: ProductId },

    /// A line's amount changed.
    AmountChanged { product_id: ProductId, amount: i64 },

    /// The line was filtered out and the snapshot rewritten.
    /// `present` tells whether there was a line to remove.
    Removed { product_id: ProductId, present: bool },

    /// Nothing happened and nothing was said.
    Skipped(SkipReason),

    /// Nothing changed; the notice was sent to the notifier.
    Rejected(CartNotice),
}

impl Outcome {
    /// True when the operation committed a new snapshot.
    pub fn is_committed(&self) -> bool {
        matches!(
            self,
            Outcome::Appended { .. } | Outcome::AmountChanged { .. } | Outcome::Removed { .. }
        )
    }

    /// The notice sent, if any.
    pub fn notice(&self) -> Option<CartNotice> {
        match self {
            Outcome::Rejected(notice) => Some(*notice),
            _ => None,
        }
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The cart and its operations.
///
/// Share it behind an `Arc`; all methods take `&self`.
pub struct CartStore {
    catalog: Arc<dyn Catalog>,
    notifier: Arc<dyn Notifier>,
    snapshots: Arc<dyn SnapshotStore>,
    settings: CartSettings,
    committed: watch::Sender<Cart>,
    gate: Mutex<()>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("settings", &self.settings)
            .field("items", &self.committed.borrow().len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Opens the store, restoring the cart from its snapshot.
    ///
    /// ## Snapshot Handling
    /// - absent → empty cart
    /// - malformed (bad JSON, duplicate ids) → empty cart, logged at `warn`
    ///
    /// ## Errors
    /// - `CartError::InvalidSettings` for an empty snapshot key
    /// - `CartError::Storage` if the snapshot store cannot be read
    pub async fn open(
        catalog: Arc<dyn Catalog>,
        notifier: Arc<dyn Notifier>,
        snapshots: Arc<dyn SnapshotStore>,
        settings: CartSettings,
    ) -> CartResult<Self> {
        settings.validate()?;

        let cart = match snapshots.load(&settings.snapshot_key).await? {
            None => {
                debug!(key = %settings.snapshot_key, "No cart snapshot, starting empty");
                Cart::new()
            }
            Some(raw) => match Cart::from_snapshot_json(&raw) {
                Ok(cart) => {
                    info!(
                        key = %settings.snapshot_key,
                        items = cart.len(),
                        "Cart restored from snapshot"
                    );
                    cart
                }
                Err(e) => {
                    warn!(
                        key = %settings.snapshot_key,
                        error = %e,
                        "Discarding malformed cart snapshot"
                    );
                    Cart::new()
                }
            },
        };

        let (committed, _) = watch::channel(cart);

        Ok(CartStore {
            catalog,
            notifier,
            snapshots,
            settings,
            committed,
            gate: Mutex::new(()),
        })
    }

    // =========================================================================
    // Read-only Views
    // =========================================================================

    /// The last committed cart.
    pub fn cart(&self) -> Cart {
        self.committed.borrow().clone()
    }

    /// Totals of the last committed cart.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(&*self.committed.borrow())
    }

    /// A receiver that observes every commit.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.committed.subscribe()
    }

    pub fn settings(&self) -> &CartSettings {
        &self.settings
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Not in cart: append `{ ..product, amount: 1 }`
    /// - In cart, stock rule passes: same as `update_product_amount(id, +1)`
    /// - In cart, stock rule fails: "Requested quantity out of stock"
    /// - Catalog or storage failure: "Error adding product"
    pub async fn add_product(&self, product_id: ProductId) -> Outcome {
        let _turn = self.gate.lock().await;
        debug!(product_id = %product_id, "Adding product");

        let fetched = async {
            let product = self.catalog.product(product_id).await?;
            let stock = self.catalog.stock(product_id).await?;
            Ok::<_, CatalogError>((product, stock))
        }
        .await;

        let (product, stock) = match fetched {
            Ok(found) => found,
            Err(e) => return self.fetch_failed(CartNotice::AddFailed, product_id, &e),
        };

        let current = self.cart();
        match plan_add(&current, &product, &stock, self.settings.stock_check) {
            AddPlan::OutOfStock { current, available } => {
                self.out_of_stock(product_id, current, available)
            }
            AddPlan::Increment => self.apply_delta(product_id, 1).await,
            AddPlan::Append(next) => match self.commit(next).await {
                Ok(()) => {
                    info!(product_id = %product_id, "Product added to cart");
                    Outcome::Appended { product_id }
                }
                Err(e) => self.commit_failed(CartNotice::AddFailed, product_id, &e),
            },
        }
    }

    /// Removes a product's line.
    ///
    /// Always rewrites the snapshot, even when the product was not in the
    /// cart. Storage failure: "Error removing product".
    pub async fn remove_product(&self, product_id: ProductId) -> Outcome {
        let _turn = self.gate.lock().await;
        debug!(product_id = %product_id, "Removing product");

        let current = self.cart();
        let present = current.contains(product_id);
        let next = plan_remove(&current, product_id);

        match self.commit(next).await {
            Ok(()) => {
                info!(product_id = %product_id, present, "Product removed from cart");
                Outcome::Removed {
                    product_id,
                    present,
                }
            }
            Err(e) => self.commit_failed(CartNotice::RemoveFailed, product_id, &e),
        }
    }

    /// Adds `request.amount` (a delta) to a line's amount.
    ///
    /// ## Behavior
    /// - Stock is fetched first
    /// - Not in cart / amount ≤ 0: silent no-op
    /// - Stock rule fails: "Requested quantity out of stock"
    /// - Catalog or storage failure: "Error changing product quantity"
    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> Outcome {
        let _turn = self.gate.lock().await;
        self.apply_delta(request.product_id, request.amount).await
    }

    /// Update body; the caller holds the gate.
    async fn apply_delta(&self, product_id: ProductId, delta: i64) -> Outcome {
        debug!(product_id = %product_id, delta, "Changing product amount");

        let stock = match self.catalog.stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => return self.fetch_failed(CartNotice::UpdateFailed, product_id, &e),
        };

        let current = self.cart();
        match plan_update(&current, product_id, delta, &stock, self.settings.stock_check) {
            UpdatePlan::NotInCart => {
                debug!(product_id = %product_id, "Product not in cart, nothing to change");
                Outcome::Skipped(SkipReason::NotInCart)
            }
            UpdatePlan::NonPositive => Outcome::Skipped(SkipReason::NonPositive),
            UpdatePlan::BelowMinimum { current, requested } => {
                debug!(product_id = %product_id, current, requested, "Amount would drop below 1");
                Outcome::Skipped(SkipReason::BelowMinimum)
            }
            UpdatePlan::OutOfStock { current, available } => {
                self.out_of_stock(product_id, current, available)
            }
            UpdatePlan::Apply { cart, amount } => match self.commit(cart).await {
                Ok(()) => {
                    info!(product_id = %product_id, amount, "Product amount changed");
                    Outcome::AmountChanged { product_id, amount }
                }
                Err(e) => self.commit_failed(CartNotice::UpdateFailed, product_id, &e),
            },
        }
    }

    // =========================================================================
    // Commit and Notification
    // =========================================================================

    /// Writes the snapshot, then publishes `next` as the committed cart.
    async fn commit(&self, next: Cart) -> CartResult<()> {
        let json = next.to_snapshot_json()?;
        self.snapshots.save(&self.settings.snapshot_key, &json).await?;
        self.committed.send_replace(next);
        Ok(())
    }

    fn out_of_stock(&self, product_id: ProductId, current: i64, available: i64) -> Outcome {
        warn!(product_id = %product_id, current, available, "Requested quantity out of stock");
        self.notify(CartNotice::OutOfStock)
    }

    fn fetch_failed(&self, notice: CartNotice, product_id: ProductId, e: &CatalogError) -> Outcome {
        warn!(
            product_id = %product_id,
            error = %e,
            retryable = e.is_retryable(),
            "Catalog lookup failed"
        );
        self.notify(notice)
    }

    fn commit_failed(
        &self,
        notice: CartNotice,
        product_id: ProductId,
        e: &crate::error::CartError,
    ) -> Outcome {
        error!(product_id = %product_id, error = %e, "Cart commit failed");
        self.notify(notice)
    }

    fn notify(&self, notice: CartNotice) -> Outcome {
        self.notifier.warn(notice.message());
        Outcome::Rejected(notice)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CartError;
    use crate::notifier::MemoryNotifier;
    use async_trait::async_trait;
    use rocket_catalog::InMemoryCatalog;
    use rocket_core::{Money, Product, StockCheck};
    use rocket_storage::{
        Database, DbConfig, MemorySnapshotStore, StorageError, StorageResult,
    };

    const KEY: &str = "@RocketShoes:cart";

    /// Snapshot store whose every call fails.
    struct BrokenStore;

    #[async_trait]
    impl SnapshotStore for BrokenStore {
        async fn load(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::ConnectionFailed("disk gone".into()))
        }

        async fn save(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::ConnectionFailed("disk gone".into()))
        }

        async fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::ConnectionFailed("disk gone".into()))
        }
    }

    fn sneaker(id: u32, cents: i64) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Tênis {}", id),
            Money::from_cents(cents),
            format!("https://cdn.example.com/{}.jpg", id),
        )
    }

    fn catalog(stock: &[(u32, i64)]) -> Arc<InMemoryCatalog> {
        let catalog = InMemoryCatalog::new();
        for &(id, amount) in stock {
            catalog.insert_product(sneaker(id, 10_000 + id as i64 * 1_000));
            catalog.set_stock(ProductId::new(id), amount);
        }
        Arc::new(catalog)
    }

    struct Harness {
        store: CartStore,
        catalog: Arc<InMemoryCatalog>,
        notifier: Arc<MemoryNotifier>,
        snapshots: Arc<MemorySnapshotStore>,
    }

    async fn harness_with(
        catalog: Arc<InMemoryCatalog>,
        snapshots: Arc<MemorySnapshotStore>,
        settings: CartSettings,
    ) -> Harness {
        let notifier = Arc::new(MemoryNotifier::new());
        let store = CartStore::open(
            catalog.clone(),
            notifier.clone(),
            snapshots.clone(),
            settings,
        )
        .await
        .unwrap();

        Harness {
            store,
            catalog,
            notifier,
            snapshots,
        }
    }

    async fn harness(stock: &[(u32, i64)]) -> Harness {
        harness_with(
            catalog(stock),
            Arc::new(MemorySnapshotStore::new()),
            CartSettings::default(),
        )
        .await
    }

    fn amounts(cart: &Cart) -> Vec<(u32, i64)> {
        cart.iter()
            .map(|item| (item.product_id().get(), item.amount))
            .collect()
    }

    async fn persisted(snapshots: &MemorySnapshotStore) -> Option<Cart> {
        snapshots
            .load(KEY)
            .await
            .unwrap()
            .map(|raw| Cart::from_snapshot_json(&raw).unwrap())
    }

    fn id(raw: u32) -> ProductId {
        ProductId::new(raw)
    }

    // -------------------------------------------------------------------------
    // add_product
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_until_stock_exhausted() {
        let h = harness(&[(1, 5)]).await;

        assert_eq!(
            h.store.add_product(id(1)).await,
            Outcome::Appended { product_id: id(1) }
        );
        assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);

        for expected in 2..=5 {
            assert_eq!(
                h.store.add_product(id(1)).await,
                Outcome::AmountChanged {
                    product_id: id(1),
                    amount: expected
                }
            );
        }
        assert_eq!(amounts(&h.store.cart()), vec![(1, 5)]);
        assert!(h.notifier.is_empty());

        assert_eq!(
            h.store.add_product(id(1)).await,
            Outcome::Rejected(CartNotice::OutOfStock)
        );
        assert_eq!(amounts(&h.store.cart()), vec![(1, 5)]);
        assert_eq!(h.notifier.messages(), vec!["Requested quantity out of stock"]);
        assert_eq!(persisted(&h.snapshots).await.unwrap(), h.store.cart());
    }

    #[tokio::test]
    async fn test_add_appends_at_end_and_keeps_others() {
        let h = harness(&[(1, 5), (2, 5), (3, 5)]).await;

        h.store.add_product(id(2)).await;
        h.store.add_product(id(1)).await;
        h.store.add_product(id(2)).await;
        h.store.add_product(id(3)).await;

        assert_eq!(amounts(&h.store.cart()), vec![(2, 2), (1, 1), (3, 1)]);
        let line = h.store.cart().find(id(1)).cloned().unwrap();
        assert_eq!(line.product.title, "Tênis 1");
        assert_eq!(line.product.unit_price(), Money::from_cents(11_000));
    }

    #[tokio::test]
    async fn test_add_refetches_stock_on_increment() {
        let h = harness(&[(1, 5)]).await;

        h.store.add_product(id(1)).await;
        assert_eq!(h.catalog.product_requests(), 1);
        assert_eq!(h.catalog.stock_requests(), 1);

        h.store.add_product(id(1)).await;
        assert_eq!(h.catalog.product_requests(), 2);
        // once for add, once more for the increment
        assert_eq!(h.catalog.stock_requests(), 3);
    }

    #[tokio::test]
    async fn test_add_new_product_without_stock_is_not_checked() {
        let h = harness(&[(1, 0)]).await;
        assert_eq!(
            h.store.add_product(id(1)).await,
            Outcome::Appended { product_id: id(1) }
        );
    }

    #[tokio::test]
    async fn test_add_catalog_failure() {
        let h = harness(&[(1, 5)]).await;
        h.store.add_product(id(1)).await;
        let writes = h.snapshots.write_count();

        h.catalog.set_offline(true);
        assert_eq!(
            h.store.add_product(id(1)).await,
            Outcome::Rejected(CartNotice::AddFailed)
        );
        assert_eq!(h.notifier.messages(), vec!["Error adding product"]);
        assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
        assert_eq!(h.snapshots.write_count(), writes);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let h = harness(&[(1, 5)]).await;
        assert_eq!(
            h.store.add_product(id(42)).await,
            Outcome::Rejected(CartNotice::AddFailed)
        );
        assert!(h.store.cart().is_empty());
        assert_eq!(persisted(&h.snapshots).await, None);
    }

    #[tokio::test]
    async fn test_add_save_failure_leaves_cart_untouched() {
        let h = harness(&[(1, 5)]).await;
        h.store.add_product(id(1)).await;
        let watcher = h.store.subscribe();

        h.catalog.insert_product(sneaker(2, 5_000));
        h.catalog.set_stock(id(2), 1);

        h.snapshots.fail_writes(true);
        assert_eq!(
            h.store.add_product(id(2)).await,
            Outcome::Rejected(CartNotice::AddFailed)
        );

        assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
        assert_eq!(amounts(&persisted(&h.snapshots).await.unwrap()), vec![(1, 1)]);
        assert!(!watcher.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_add_increment_save_failure_reports_update_failure() {
        let h = harness(&[(1, 5)]).await;
        h.store.add_product(id(1)).await;

        h.snapshots.fail_writes(true);
        assert_eq!(
            h.store.add_product(id(1)).await,
            Outcome::Rejected(CartNotice::UpdateFailed)
        );
        assert_eq!(h.notifier.last().as_deref(), Some("Error changing product quantity"));
        assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    }

    #[tokio::test]
    async fn test_add_prospective_rejects_empty_stock() {
        let h = harness_with(
            catalog(&[(1, 0), (2, 2)]),
            Arc::new(MemorySnapshotStore::new()),
            CartSettings::default().with_stock_check(StockCheck::Prospective),
        )
        .await;

        assert_eq!(
            h.store.add_product(id(1)).await,
            Outcome::Rejected(CartNotice::OutOfStock)
        );
        h.store.add_product(id(2)).await;
        h.store.add_product(id(2)).await;
        assert_eq!(
            h.store.add_product(id(2)).await,
            Outcome::Rejected(CartNotice::OutOfStock)
        );
        assert_eq!(amounts(&h.store.cart()), vec![(2, 2)]);
    }

    // -------------------------------------------------------------------------
    // remove_product
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let h = harness(&[(1, 5), (2, 5), (3, 5)]).await;
        for raw in [1, 2, 3] {
            h.store.add_product(id(raw)).await;
        }

        assert_eq!(
            h.store.remove_product(id(2)).await,
            Outcome::Removed {
                product_id: id(2),
                present: true
            }
        );
        let once = h.store.cart();
        assert_eq!(amounts(&once), vec![(1, 1), (3, 1)]);

        assert_eq!(
            h.store.remove_product(id(2)).await,
            Outcome::Removed {
                product_id: id(2),
                present: false
            }
        );
        assert_eq!(h.store.cart(), once);
        assert_eq!(persisted(&h.snapshots).await.unwrap(), once);
    }

    #[tokio::test]
    async fn test_remove_absent_still_rewrites_snapshot() {
        let h = harness(&[]).await;
        assert_eq!(h.snapshots.write_count(), 0);

        h.store.remove_product(id(7)).await;

        assert_eq!(h.snapshots.write_count(), 1);
        assert_eq!(persisted(&h.snapshots).await, Some(Cart::new()));
        assert_eq!(h.catalog.stock_requests(), 0);
    }

    #[tokio::test]
    async fn test_remove_save_failure() {
        let h = harness(&[(1, 5)]).await;
        h.store.add_product(id(1)).await;

        h.snapshots.fail_writes(true);
        assert_eq!(
            h.store.remove_product(id(1)).await,
            Outcome::Rejected(CartNotice::RemoveFailed)
        );
        assert_eq!(h.notifier.messages(), vec!["Error removing product"]);
        assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    }

    // -------------------------------------------------------------------------
    // update_product_amount
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_adds_delta() {
        let h = harness(&[(1, 10), (2, 10)]).await;
        h.store.add_product(id(1)).await;
        h.store.add_product(id(2)).await;

        let outcome = h
            .store
            .update_product_amount(UpdateProductAmount {
                product_id: id(1),
                amount: 3,
            })
            .await;
        assert_eq!(
            outcome,
            Outcome::AmountChanged {
                product_id: id(1),
                amount: 4
            }
        );

        h.store
            .update_product_amount(UpdateProductAmount {
                product_id: id(1),
                amount: -1,
            })
            .await;
        assert_eq!(amounts(&h.store.cart()), vec![(1, 3), (2, 1)]);
    }

    #[tokio::test]
    async fn test_update_absent_is_silent() {
        let h = harness(&[(1, 10), (2, 10)]).await;
        h.store.add_product(id(1)).await;
        let writes = h.snapshots.write_count();

        let outcome = h
            .store
            .update_product_amount(UpdateProductAmount {
                product_id: id(2),
                amount: 1,
            })
            .await;

        assert_eq!(outcome, Outcome::Skipped(SkipReason::NotInCart));
        assert!(h.notifier.is_empty());
        assert_eq!(h.snapshots.write_count(), writes);
        // stock is still fetched first
        assert_eq!(h.catalog.stock_requests(), 2);
    }

    #[tokio::test]
    async fn test_update_at_stock_rejected_for_any_delta() {
        let h = harness(&[(1, 2)]).await;
        h.store.add_product(id(1)).await;
        h.store.add_product(id(1)).await;

        for delta in [1, -1] {
            let outcome = h
                .store
                .update_product_amount(UpdateProductAmount {
                    product_id: id(1),
                    amount: delta,
                })
                .await;
            assert_eq!(outcome, Outcome::Rejected(CartNotice::OutOfStock));
        }
        assert_eq!(amounts(&h.store.cart()), vec![(1, 2)]);
        assert_eq!(h.notifier.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_update_non_positive_line_is_silent() {
        let snapshot = r#"[{"id":1,"title":"Tênis 1","price":110,"image":"","amount":0}]"#;
        let h = harness_with(
            catalog(&[(1, 5)]),
            Arc::new(MemorySnapshotStore::with_entry(KEY, snapshot)),
            CartSettings::default(),
        )
        .await;

        let outcome = h
            .store
            .update_product_amount(UpdateProductAmount {
                product_id: id(1),
                amount: 1,
            })
            .await;
        assert_eq!(outcome, Outcome::Skipped(SkipReason::NonPositive));
        assert!(h.notifier.is_empty());
    }

    #[tokio::test]
    async fn test_update_catalog_failure() {
        let h = harness(&[(1, 5)]).await;
        h.store.add_product(id(1)).await;
        h.catalog.set_offline(true);

        let outcome = h
            .store
            .update_product_amount(UpdateProductAmount {
                product_id: id(1),
                amount: 1,
            })
            .await;
        assert_eq!(outcome, Outcome::Rejected(CartNotice::UpdateFailed));
        assert_eq!(h.notifier.messages(), vec!["Error changing product quantity"]);
    }

    #[tokio::test]
    async fn test_update_prospective_below_minimum() {
        let h = harness_with(
            catalog(&[(1, 5)]),
            Arc::new(MemorySnapshotStore::new()),
            CartSettings::default().with_stock_check(StockCheck::Prospective),
        )
        .await;
        h.store.add_product(id(1)).await;

        let outcome = h
            .store
            .update_product_amount(UpdateProductAmount {
                product_id: id(1),
                amount: -1,
            })
            .await;
        assert_eq!(outcome, Outcome::Skipped(SkipReason::BelowMinimum));

        let outcome = h
            .store
            .update_product_amount(UpdateProductAmount {
                product_id: id(1),
                amount: 5,
            })
            .await;
        assert_eq!(outcome, Outcome::Rejected(CartNotice::OutOfStock));
        assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    }

    #[tokio::test]
    async fn test_update_extreme_deltas_keep_totals_readable() {
        let h = harness(&[(1, 10)]).await;
        h.store.add_product(id(1)).await;

        let update = |amount: i64| {
            h.store.update_product_amount(UpdateProductAmount {
                product_id: id(1),
                amount,
            })
        };

        assert!(update(i64::MAX / 2).await.is_committed());
        assert_eq!(
            update(i64::MAX / 2).await,
            Outcome::AmountChanged {
                product_id: id(1),
                amount: i64::MAX
            }
        );
        let totals = h.store.totals();
        assert_eq!(totals.total_quantity, i64::MAX);
        assert_eq!(totals.total, Money::from_cents(i64::MAX));

        // past i64::MAX is refused like any other overshoot
        assert_eq!(update(i64::MAX).await, Outcome::Rejected(CartNotice::OutOfStock));
        assert_eq!(update(1).await, Outcome::Rejected(CartNotice::OutOfStock));
        assert_eq!(amounts(&h.store.cart()), vec![(1, i64::MAX)]);

        let reopened = harness_with(h.catalog.clone(), h.snapshots.clone(), CartSettings::default()).await;
        assert_eq!(reopened.store.cart(), h.store.cart());
        assert_eq!(reopened.store.totals(), totals);

        assert_eq!(
            update(i64::MIN).await,
            Outcome::AmountChanged {
                product_id: id(1),
                amount: -1
            }
        );
        assert_eq!(h.store.totals().total, Money::from_cents(-11_000));
    }

    // -------------------------------------------------------------------------
    // open / snapshot round trip
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_catalog_attributes_survive_snapshot() {
        let catalog = catalog(&[]);
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 9,
            "title": "Tênis de Corrida",
            "price": 19.999,
            "image": "9.jpg",
            "color": "red",
            "sizes": [38, 39, 40]
        }))
        .unwrap();
        catalog.insert_product(product.clone());
        catalog.set_stock(id(9), 3);

        let h = harness_with(catalog, Arc::new(MemorySnapshotStore::new()), CartSettings::default()).await;
        h.store.add_product(id(9)).await;

        let raw = h.snapshots.load(KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["price"], serde_json::json!(19.999));
        assert_eq!(value[0]["color"], "red");
        assert_eq!(value[0]["sizes"], serde_json::json!([38, 39, 40]));

        let reopened = harness_with(h.catalog.clone(), h.snapshots.clone(), CartSettings::default()).await;
        assert_eq!(reopened.store.cart().find(id(9)).unwrap().product, product);
        assert_eq!(reopened.store.totals().total, Money::from_cents(2_000));
    }

    #[tokio::test]
    async fn test_reload_reproduces_cart() {
        let h = harness(&[(1, 5), (2, 5), (3, 5)]).await;
        h.store.add_product(id(3)).await;
        h.store.add_product(id(1)).await;
        h.store.add_product(id(1)).await;
        h.store.add_product(id(2)).await;
        h.store.remove_product(id(3)).await;

        let reopened = harness_with(h.catalog.clone(), h.snapshots.clone(), CartSettings::default()).await;
        assert_eq!(reopened.store.cart(), h.store.cart());
        assert_eq!(amounts(&reopened.store.cart()), vec![(1, 2), (2, 1)]);
    }

    #[tokio::test]
    async fn test_open_with_malformed_snapshot_starts_empty() {
        for raw in [
            "not json",
            r#"{"id":1}"#,
            r#"[{"id":1,"title":"a","price":1,"image":"","amount":1},{"id":1,"title":"a","price":1,"image":"","amount":1}]"#,
        ] {
            let h = harness_with(
                catalog(&[(1, 5)]),
                Arc::new(MemorySnapshotStore::with_entry(KEY, raw)),
                CartSettings::default(),
            )
            .await;
            assert!(h.store.cart().is_empty(), "snapshot {:?}", raw);
        }
    }

    #[tokio::test]
    async fn test_open_uses_configured_key() {
        let snapshot = r#"[{"id":1,"title":"Tênis 1","price":110,"image":"","amount":2}]"#;
        let snapshots = Arc::new(MemorySnapshotStore::with_entry("other", snapshot));

        let default_key = harness_with(catalog(&[]), snapshots.clone(), CartSettings::default()).await;
        assert!(default_key.store.cart().is_empty());

        let custom = harness_with(
            catalog(&[]),
            snapshots,
            CartSettings::default().with_snapshot_key("other"),
        )
        .await;
        assert_eq!(amounts(&custom.store.cart()), vec![(1, 2)]);
    }

    #[tokio::test]
    async fn test_open_errors() {
        let err = CartStore::open(
            catalog(&[]),
            Arc::new(MemoryNotifier::new()),
            Arc::new(BrokenStore),
            CartSettings::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CartError::Storage(_)));

        let err = CartStore::open(
            catalog(&[]),
            Arc::new(MemoryNotifier::new()),
            Arc::new(MemorySnapshotStore::new()),
            CartSettings::default().with_snapshot_key(""),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CartError::InvalidSettings(_)));
    }

    #[tokio::test]
    async fn test_sqlite_snapshot_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let catalog = catalog(&[(1, 5), (2, 5)]);

        let store = CartStore::open(
            catalog.clone(),
            Arc::new(MemoryNotifier::new()),
            Arc::new(db.snapshots()),
            CartSettings::default(),
        )
        .await
        .unwrap();
        store.add_product(id(2)).await;
        store.add_product(id(1)).await;
        store.add_product(id(2)).await;

        let record = db.snapshots().get(KEY).await.unwrap().unwrap();
        assert_eq!(Cart::from_snapshot_json(&record.value).unwrap(), store.cart());

        let reopened = CartStore::open(
            catalog,
            Arc::new(MemoryNotifier::new()),
            Arc::new(db.snapshots()),
            CartSettings::default(),
        )
        .await
        .unwrap();
        assert_eq!(amounts(&reopened.cart()), vec![(2, 2), (1, 1)]);
    }

    // -------------------------------------------------------------------------
    // views and concurrency
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_totals_and_subscribe() {
        let h = harness(&[(1, 5), (2, 5)]).await;
        let mut watcher = h.store.subscribe();

        h.store.add_product(id(1)).await;
        watcher.changed().await.unwrap();
        assert_eq!(watcher.borrow_and_update().len(), 1);

        h.store.add_product(id(1)).await;
        h.store.add_product(id(2)).await;

        let totals = h.store.totals();
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.total, Money::from_cents(2 * 11_000 + 12_000));
        assert_eq!(*watcher.borrow(), h.store.cart());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_do_not_lose_updates() {
        let h = harness(&[(1, 50)]).await;
        let store = Arc::new(h.store);

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.add_product(ProductId::new(1)).await })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().is_committed());
        }

        assert_eq!(amounts(&store.cart()), vec![(1, 10)]);
        assert_eq!(amounts(&persisted(&h.snapshots).await.unwrap()), vec![(1, 10)]);
    }

    #[test]
    fn test_outcome_helpers_and_json() {
        let rejected = Outcome::Rejected(CartNotice::OutOfStock);
        assert!(!rejected.is_committed());
        assert_eq!(rejected.notice(), Some(CartNotice::OutOfStock));

        let changed = Outcome::AmountChanged {
            product_id: id(1),
            amount: 2,
        };
        assert!(changed.is_committed());
        assert_eq!(changed.notice(), None);

        let json = serde_json::to_value(&changed).unwrap();
        assert_eq!(json["outcome"], "amount_changed");
        assert_eq!(json["detail"]["amount"], 2);

        let json = serde_json::to_value(Outcome::Skipped(SkipReason::NotInCart)).unwrap();
        assert_eq!(json["detail"], "not_in_cart");
    }

    #[test]
    fn test_update_request_wire_shape() {
        let request: UpdateProductAmount =
            serde_json::from_str(r#"{"productId":3,"amount":-1}"#).unwrap();
        assert_eq!(request.product_id, id(3));
        assert_eq!(request.amount, -1);
    }
}
