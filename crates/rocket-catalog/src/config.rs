//! # Catalog Configuration
//!
//! Where the catalog lives and how long to wait for it.
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10   # omit for no timeout
//! ```
//!
//! The `[catalog]` table is embedded in the application's `cart.toml`; the
//! application applies `ROCKET_CATALOG_URL` / `ROCKET_CATALOG_TIMEOUT_SECS`
//! on top before calling [`CatalogConfig::validate`].

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Default catalog address (the storefront's json-server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Remote catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL; `products/{id}` and `stock/{id}` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds. `None` waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl CatalogConfig {
    /// Creates a config pointing at `base_url` with no timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogConfig {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - `base_url` parses and uses http or https
    /// - `timeout_secs`, when set, is greater than zero
    pub fn validate(&self) -> CatalogResult<()> {
        self.parsed_base_url()?;

        if self.timeout_secs == Some(0) {
            return Err(CatalogError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Parses `base_url`, normalised to end with `/` so relative joins keep
    /// any path prefix (`http://host/api` → `http://host/api/products/1`).
    pub fn parsed_base_url(&self) -> CatalogResult<Url> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidUrl("base_url is empty".into()));
        }

        let mut normalised = trimmed.to_string();
        if !normalised.ends_with('/') {
            normalised.push('/');
        }

        let url = Url::parse(&normalised)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CatalogError::InvalidUrl(format!(
                "Catalog URL must start with http:// or https://, got scheme '{}'",
                other
            ))),
        }
    }
}
