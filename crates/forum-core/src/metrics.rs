//! Operation counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the monotonic operation counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    /// Posts created.
    Posts,
    /// Comments created and linked.
    Comments,
    /// Votes counted.
    Votes,
    /// Users registered.
    ActiveUsers,
    /// Direct messages sent.
    Messages,
}

/// A point-in-time copy of the engine's counters.
///
/// Counters only ever grow, by exactly one per successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Posts created.
    pub total_posts: u64,
    /// Comments created and linked into a thread.
    pub total_comments: u64,
    /// Votes counted.
    pub total_votes: u64,
    /// Users registered.
    pub active_users: u64,
    /// Direct messages sent.
    pub total_messages: u64,
    /// When counting started.
    pub start_time: DateTime<Utc>,
}

impl MetricsSnapshot {
    /// All counters at zero, starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            total_posts: 0,
            total_comments: 0,
            total_votes: 0,
            active_users: 0,
            total_messages: 0,
            start_time: Utc::now(),
        }
    }

    /// Bump one counter by one.
    pub fn increment(&mut self, counter: Counter) {
        let slot = match counter {
            Counter::Posts => &mut self.total_posts,
            Counter::Comments => &mut self.total_comments,
            Counter::Votes => &mut self.total_votes,
            Counter::ActiveUsers => &mut self.active_users,
            Counter::Messages => &mut self.total_messages,
        };
        *slot += 1;
    }

    /// Read one counter.
    #[must_use]
    pub const fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::Posts => self.total_posts,
            Counter::Comments => self.total_comments,
            Counter::Votes => self.total_votes,
            Counter::ActiveUsers => self.active_users,
            Counter::Messages => self.total_messages,
        }
    }
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_moves_only_its_counter() {
        let mut metrics = MetricsSnapshot::new();
        metrics.increment(Counter::Votes);
        metrics.increment(Counter::Votes);

        assert_eq!(metrics.get(Counter::Votes), 2);
        assert_eq!(metrics.total_posts, 0);
        assert_eq!(metrics.total_comments, 0);
        assert_eq!(metrics.active_users, 0);
        assert_eq!(metrics.total_messages, 0);
    }
}
