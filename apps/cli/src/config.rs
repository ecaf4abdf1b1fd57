//! # Application Configuration
//!
//! Configuration for the `rocket-cart` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ROCKET_CATALOG_URL=http://localhost:3333                           │
//! │     ROCKET_STOCK_CHECK=prospective                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/cart.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.rocketshoes.cart/cart.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     json-server on :3333, SQLite in the data dir                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! [catalog]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10          # omit to wait indefinitely
//!
//! [storage]
//! database_path = "/var/lib/rocket/cart.db"
//! max_connections = 4
//!
//! [cart]
//! snapshot_key = "@RocketShoes:cart"
//! stock_check = "current_amount"
//! ```

use rocket_cart::CartSettings;
use rocket_catalog::CatalogConfig;
use rocket_storage::DbConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "rocketshoes";
const APPLICATION: &str = "cart";

// =============================================================================
// Storage Settings
// =============================================================================

/// Where the cart snapshot database lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to `cart.db` in the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    4
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            max_connections: default_max_connections(),
        }
    }
}

impl StorageSettings {
    /// The configured path, or the platform default.
    pub fn resolved_path(&self) -> CliResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
                .map(|dirs| dirs.data_dir().join("cart.db"))
                .ok_or_else(|| {
                    CliError::InvalidConfig("Could not determine app data directory".into())
                }),
        }
    }

    /// Builds the database config, creating the database's parent directory.
    pub fn db_config(&self) -> CliResult<DbConfig> {
        let path = self.resolved_path()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(DbConfig::new(path).max_connections(self.max_connections))
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file and returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        self.catalog.validate()?;
        self.cart.validate()?;

        if self.storage.max_connections == 0 {
            return Err(CliError::InvalidConfig(
                "max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides read through `lookup` (the process environment
    /// in [`AppConfig::load`]).
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ROCKET_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(secs) = lookup("ROCKET_CATALOG_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.catalog.timeout_secs = Some(s),
                Err(_) => warn!(value = %secs, "Ignoring invalid catalog timeout in environment"),
            }
        }

        if let Some(path) = lookup("ROCKET_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("ROCKET_SNAPSHOT_KEY") {
            self.cart.snapshot_key = key;
        }

        if let Some(check) = lookup("ROCKET_STOCK_CHECK") {
            match check.parse() {
                Ok(parsed) => {
                    debug!(stock_check = %check, "Overriding stock check from environment");
                    self.cart.stock_check = parsed;
                }
                Err(_) => warn!(stock_check = %check, "Unknown stock check in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}
