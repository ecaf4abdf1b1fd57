//! # In-Memory Catalog
//!
//! A catalog held in process memory. Used for offline demos (seeded from a
//! json-server style document) and as the test double for the cart store.
//!
//! ## Seed Document
//! ```json
//! {
//!   "products": [ { "id": 1, "title": "...", "price": 179.9, "image": "..." } ],
//!   "stock":    [ { "id": 1, "amount": 3 } ]
//! }
//! ```

use async_trait::async_trait;
use rocket_core::{Product, ProductId, StockInfo};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::Catalog;

#[derive(Debug, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<StockInfo>,
}

#[derive(Debug, Default)]
struct CatalogData {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, i64>,
}

/// Mutable, process-local catalog.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    data: RwLock<CatalogData>,
    offline: AtomicBool,
    product_requests: AtomicUsize,
    stock_requests: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a seed document.
    pub fn from_seed_json(json: &str) -> CatalogResult<Self> {
        let seed: SeedDocument = serde_json::from_str(json)?;
        let catalog = InMemoryCatalog::new();

        for product in seed.products {
            catalog.insert_product(product);
        }
        for stock in seed.stock {
            if stock.amount < 0 {
                return Err(CatalogError::SeedLoadFailed(format!(
                    "negative stock for product {}",
                    stock.product_id
                )));
            }
            catalog.set_stock(stock.product_id, stock.amount);
        }

        Ok(catalog)
    }

    /// Reads and parses a seed document from disk.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_seed_json(&contents)?;

        info!(
            path = %path.display(),
            products = catalog.product_count(),
            "Loaded catalog seed"
        );
        Ok(catalog)
    }

    /// Adds or replaces a product.
    pub fn insert_product(&self, product: Product) {
        self.write().products.insert(product.id, product);
    }

    /// Sets the stock level for a product.
    pub fn set_stock(&self, id: ProductId, amount: i64) {
        debug!(product_id = %id, amount, "Setting stock");
        self.write().stock.insert(id, amount);
    }

    /// When offline every lookup fails with `CatalogError::Offline`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn product_count(&self) -> usize {
        self.read().products.len()
    }

    /// Number of `product` lookups served or refused so far.
    pub fn product_requests(&self) -> usize {
        self.product_requests.load(Ordering::SeqCst)
    }

    /// Number of `stock` lookups served or refused so far.
    pub fn stock_requests(&self) -> usize {
        self.stock_requests.load(Ordering::SeqCst)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, CatalogData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CatalogData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_online(&self) -> CatalogResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Offline);
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn product(&self, id: ProductId) -> CatalogResult<Product> {
        self.product_requests.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        self.read()
            .products
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound {
                resource: "products",
                id,
            })
    }

    async fn stock(&self, id: ProductId) -> CatalogResult<StockInfo> {
        self.stock_requests.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;

        self.read()
            .stock
            .get(&id)
            .map(|&amount| StockInfo::new(id, amount))
            .ok_or(CatalogError::NotFound {
                resource: "stock",
                id,
            })
    }
}
