//! # rocket-cart Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging)
//! 3. Load cart.toml and ROCKET_* overrides
//! 4. Open the catalog, SQLite snapshot store and cart store
//! 5. Run the command and print the cart

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use rocket_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    rocket_cli::init_tracing();

    match rocket_cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, config_error = e.is_config_error(), "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
