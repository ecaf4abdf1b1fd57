//! # Cart Settings
//!
//! ```toml
//! [cart]
//! snapshot_key = "@RocketShoes:cart"
//! stock_check = "current_amount"   # current_amount | prospective
//! ```

use rocket_core::{StockCheck, DEFAULT_SNAPSHOT_KEY};
use serde::{Deserialize, Serialize};

use crate::error::{CartError, CartResult};

/// Per-store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Key of the snapshot entry in the snapshot store.
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,

    /// Stock rule applied by add and update.
    #[serde(default)]
    pub stock_check: StockCheck,
}

fn default_snapshot_key() -> String {
    DEFAULT_SNAPSHOT_KEY.to_string()
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            snapshot_key: default_snapshot_key(),
            stock_check: StockCheck::default(),
        }
    }
}

impl CartSettings {
    pub fn with_snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }

    pub fn with_stock_check(mut self, check: StockCheck) -> Self {
        self.stock_check = check;
        self
    }

    /// Validates the settings.
    pub fn validate(&self) -> CartResult<()> {
        if self.snapshot_key.trim().is_empty() {
            return Err(CartError::InvalidSettings(
                "snapshot_key must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CartSettings::default();
        assert_eq!(settings.snapshot_key, "@RocketShoes:cart");
        assert_eq!(settings.stock_check, StockCheck::CurrentAmount);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(CartSettings::default().with_snapshot_key(" ").validate().is_err());
        assert!(CartSettings::default().with_snapshot_key("cart:2").validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: CartSettings =
            serde_json::from_str(r#"{ "stock_check": "prospective" }"#).unwrap();
        assert_eq!(settings.snapshot_key, "@RocketShoes:cart");
        assert_eq!(settings.stock_check, StockCheck::Prospective);
    }
}
