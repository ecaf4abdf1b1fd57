//! # HTTP Catalog
//!
//! Catalog client for the storefront's REST API.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET {base}/products/{id}  → { "id", "title", "price", "image" }       │
//! │  GET {base}/stock/{id}     → { "id", "amount" }                        │
//! │                                                                         │
//! │  200        decode body, check id matches request                      │
//! │  404        CatalogError::NotFound                                     │
//! │  other      CatalogError::Status                                       │
//! │  transport  CatalogError::Request / CatalogError::Timeout              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No caching: every call goes to the network, since stock must be fresh
//! for each cart operation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rocket_core::validation::{validate_product, validate_stock};
use rocket_core::{Product, ProductId, StockInfo};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::Catalog;

/// Catalog backed by the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    /// Builds a client from validated configuration.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;

        let base_url = config.parsed_base_url()?;
        debug!(base_url = %base_url, timeout_secs = ?config.timeout_secs, "HTTP catalog ready");

        Ok(HttpCatalog { client, base_url })
    }

    /// The normalised base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, resource: &str, id: ProductId) -> CatalogResult<Url> {
        Ok(self.base_url.join(&format!("{}/{}", resource, id))?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        id: ProductId,
    ) -> CatalogResult<T> {
        let url = self.endpoint(resource, id)?;
        debug!(url = %url, "Fetching from catalog");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { resource, id });
        }

        if !status.is_success() {
            warn!(url = %url, status = %status, "Catalog returned an error status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn product(&self, id: ProductId) -> CatalogResult<Product> {
        let product: Product = self.get_json("products", id).await?;
        validate_product(id, &product)?;
        Ok(product)
    }

    async fn stock(&self, id: ProductId) -> CatalogResult<StockInfo> {
        let stock: StockInfo = self.get_json("stock", id).await?;
        validate_stock(id, &stock)?;
        Ok(stock)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
