//! # rocket-cli: Cart Operator Tool
//!
//! Runs the RocketShoes cart from a terminal: the same store, catalog and
//! snapshot storage the storefront uses, driven by subcommands.
//!
//! ## Module Organization
//! ```text
//! rocket_cli/
//! ├── lib.rs          ◄─── You are here (arguments, logging, dispatch)
//! ├── config.rs       ◄─── cart.toml + ROCKET_* overrides
//! ├── state.rs        ◄─── Collaborators + CartStore
//! ├── commands/
//! │   ├── cart.rs     ◄─── show / add / remove / update
//! │   └── config.rs   ◄─── config show / init
//! └── error.rs        ◄─── CliError
//! ```
//!
//! ## Exit Codes
//! - `0` - command ran (including silent no-ops)
//! - `1` - configuration, catalog setup or storage error
//! - `2` - the operation was rejected with a notice

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use clap::{Parser, Subcommand};
use rocket_core::ProductId;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::CartReport;
use config::AppConfig;
use error::CliResult;
use state::AppState;

// =============================================================================
// Arguments
// =============================================================================

/// RocketShoes cart
#[derive(Debug, Parser)]
#[command(name = "rocket-cart", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Serve products and stock from a json-server style file instead of HTTP
    #[arg(long, global = true, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart
    Show,

    /// Add one unit of a product
    Add { product_id: ProductId },

    /// Remove a product's line
    Remove { product_id: ProductId },

    /// Change a line's amount by DELTA (e.g. 1 or -1)
    Update {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Show or write the configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Init,
}

// =============================================================================
// Entry Points
// =============================================================================

/// Runs one command.
pub async fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = AppConfig::load(cli.config.clone())?;

    let command = match cli.command {
        Command::Config { action } => {
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => print!("{}", commands::config::show(&config)?),
                ConfigAction::Init => {
                    let path = commands::config::init(&config, cli.config)?;
                    println!("Wrote {}", path.display());
                }
            }
            return Ok(ExitCode::SUCCESS);
        }
        other => other,
    };

    let state = AppState::open(&config, cli.seed.as_deref()).await?;
    let report = dispatch(&state, command).await;
    state.close().await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", commands::cart::render_text(&report));
    }

    Ok(if report.is_rejected() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

async fn dispatch(state: &AppState, command: Command) -> CartReport {
    let store = &state.store;
    match command {
        Command::Add { product_id } => commands::cart::add(store, product_id).await,
        Command::Remove { product_id } => commands::cart::remove(store, product_id).await,
        Command::Update { product_id, delta } => {
            commands::cart::update(store, product_id, delta).await
        }
        Command::Show | Command::Config { .. } => commands::cart::show(store),
    }
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rocket_cart=trace` - Show trace for the store only
/// - Default: INFO, DEBUG for rocket crates
///
/// Logs go to stderr so `--json` output stays parseable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rocket=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "rocket-cart starting");
}
