//! # Application State
//!
//! Builds the collaborators from [`AppConfig`] and opens the cart store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        AppState::open                                   │
//! │                                                                         │
//! │  --seed <file>? ── yes ──► InMemoryCatalog::from_seed_file             │
//! │        │                                                                │
//! │        no ───────────────► HttpCatalog::new(&config.catalog)           │
//! │                                                                         │
//! │  config.storage ─────────► Database (SQLite, migrations) ──► snapshots │
//! │                                                                         │
//! │  CartStore::open(catalog, TracingNotifier, snapshots, config.cart)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rocket_cart::{CartStore, TracingNotifier};
use rocket_catalog::{Catalog, HttpCatalog, InMemoryCatalog};
use rocket_storage::Database;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::config::AppConfig;
use crate::error::CliResult;

/// The opened store plus the database backing it.
pub struct AppState {
    pub store: CartStore,
    db: Database,
}

impl AppState {
    /// Opens the store described by `config`.
    ///
    /// With `seed`, products and stock come from a local json-server style
    /// file instead of the HTTP catalog.
    pub async fn open(config: &AppConfig, seed: Option<&Path>) -> CliResult<Self> {
        let catalog: Arc<dyn Catalog> = match seed {
            Some(path) => Arc::new(InMemoryCatalog::from_seed_file(path).await?),
            None => {
                let catalog = HttpCatalog::new(&config.catalog)?;
                info!(base_url = %catalog.base_url(), "Using HTTP catalog");
                Arc::new(catalog)
            }
        };

        let db = Database::new(config.storage.db_config()?).await?;
        let store = CartStore::open(
            catalog,
            Arc::new(TracingNotifier),
            Arc::new(db.snapshots()),
            config.cart.clone(),
        )
        .await?;

        Ok(AppState { store, db })
    }

    /// Closes the database pool.
    pub async fn close(self) {
        self.db.close().await;
    }
}
