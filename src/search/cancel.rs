//! Cooperative cancellation flag shared between a task handle and its search

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clonable flag; every clone observes the same cancellation request
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    requested: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}
