//! # Commands Module
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── show / add / remove / update
//! └── config.rs   ◄─── config show / config init
//! ```

pub mod cart;
pub mod config;

pub use cart::CartReport;
