//! Dispatch statistics.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::user::Activity;

/// Counters shared by every simulated user.
#[derive(Debug, Default)]
pub struct SimulatorStats {
    dispatched: [AtomicU64; Activity::ALL.len()],
    disconnects: AtomicU64,
    failures: AtomicU64,
}

impl SimulatorStats {
    /// Create zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one command handed to the sink.
    pub fn record_dispatch(&self, activity: Activity) {
        self.dispatched[activity.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Count one offline spell.
    pub fn record_disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one command the sink refused.
    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy out the counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: std::array::from_fn(|i| self.dispatched[i].load(Ordering::Relaxed)),
            disconnects: self.disconnects.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`SimulatorStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    dispatched: [u64; Activity::ALL.len()],
    /// Offline spells started.
    pub disconnects: u64,
    /// Commands the sink refused.
    pub failures: u64,
}

impl StatsSnapshot {
    /// Commands of one kind handed to the sink.
    #[must_use]
    pub fn dispatched(&self, activity: Activity) -> u64 {
        self.dispatched[activity.index()]
    }

    /// Commands of every kind handed to the sink.
    #[must_use]
    pub fn total_dispatched(&self) -> u64 {
        self.dispatched.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_activity() {
        let stats = SimulatorStats::new();
        stats.record_dispatch(Activity::CreatePost);
        stats.record_dispatch(Activity::CreatePost);
        stats.record_dispatch(Activity::SendDirectMessage);
        stats.record_disconnect();
        stats.record_failure();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.dispatched(Activity::CreatePost), 2);
        assert_eq!(snapshot.dispatched(Activity::SendDirectMessage), 1);
        assert_eq!(snapshot.dispatched(Activity::RegisterUser), 0);
        assert_eq!(snapshot.total_dispatched(), 3);
        assert_eq!(snapshot.disconnects, 1);
        assert_eq!(snapshot.failures, 1);
    }
}
