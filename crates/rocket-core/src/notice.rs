//! # Cart Notices
//!
//! The user-facing messages a cart operation can produce.
//!
//! Every failure path of a cart operation ends here: the cart store hands
//! `notice.to_string()` to the notifier and leaves the cart untouched. The
//! underlying error (network, storage, ...) is logged, never shown.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// A message for the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CartNotice {
    /// Stock rule refused the requested quantity.
    OutOfStock,

    /// Adding a product failed (catalog or storage).
    AddFailed,

    /// Removing a product failed (storage).
    RemoveFailed,

    /// Changing a quantity failed (catalog or storage).
    UpdateFailed,
}

impl CartNotice {
    /// The message shown to the shopper.
    pub const fn message(&self) -> &'static str {
        match self {
            CartNotice::OutOfStock => "Requested quantity out of stock",
            CartNotice::AddFailed => "Error adding product",
            CartNotice::RemoveFailed => "Error removing product",
            CartNotice::UpdateFailed => "Error changing product quantity",
        }
    }
}

impl fmt::Display for CartNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
