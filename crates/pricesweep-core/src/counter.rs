//! Per-run remote call counter

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic count of remote calls issued by one run
///
/// Clones share the same underlying counter, so every concurrent branch of a run
/// can hold one. Create a fresh counter per run; never share one across runs.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicU64>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call, returning the updated total
    pub fn increment(&self) -> u64 {
        self.calls.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}
