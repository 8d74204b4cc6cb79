//! The metrics counter.
//!
//! Guarded by its own lock, separate from the domain tables, so bookkeeping
//! never queues behind (or blocks) table access.

use tokio::sync::RwLock;

use forum_core::{Counter, MetricsSnapshot};

/// Separately locked tally of successful mutations.
#[derive(Debug, Default)]
pub struct MetricsCounter {
    inner: RwLock<MetricsSnapshot>,
}

impl MetricsCounter {
    /// Start counting from zero, now.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to a counter and return its new value.
    pub async fn increment(&self, counter: Counter) -> u64 {
        let mut metrics = self.inner.write().await;
        metrics.increment(counter);
        metrics.get(counter)
    }

    /// Copy out the current counters.
    pub async fn snapshot(&self) -> MetricsSnapshot {
        self.inner.read().await.clone()
    }
}
