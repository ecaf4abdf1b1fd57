//! # Notifier
//!
//! Where shopper-facing messages go. Fire-and-forget: the store never looks
//! at what the notifier does with a message.

use std::sync::{Mutex, PoisonError};

/// Receives human-readable warnings for display.
pub trait Notifier: Send + Sync {
    fn warn(&self, message: &str);
}

/// Sends notices to the log at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "rocket_cart::notice", "{}", message);
    }
}

/// Collects notices in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Returns and clears the collected messages.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    pub fn last(&self) -> Option<String> {
        self.lock().last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for MemoryNotifier {
    fn warn(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
