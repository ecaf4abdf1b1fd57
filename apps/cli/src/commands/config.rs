//! # Config Commands
//!
//! Prints the effective configuration, or writes it to disk as a starting
//! point for editing.

use std::path::PathBuf;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::CliResult;

/// The effective configuration as TOML.
pub fn show(config: &AppConfig) -> CliResult<String> {
    debug!("config show command");
    Ok(toml::to_string_pretty(config)?)
}

/// Writes `config` to `path` (or the default location) and returns the path.
pub fn init(config: &AppConfig, path: Option<PathBuf>) -> CliResult<PathBuf> {
    debug!(?path, "config init command");
    config.save(path)
}
