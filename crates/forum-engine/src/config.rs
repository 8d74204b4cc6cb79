//! Engine configuration.

use std::time::Duration;

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How often a metrics snapshot is logged and broadcast (default: 10s).
    pub metrics_interval: Duration,

    /// Capacity of the metrics broadcast channel (default: 16).
    pub metrics_channel_capacity: usize,

    /// Commands the mailbox holds before `tell` is refused (default: 10000).
    pub mailbox_capacity: usize,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            metrics_interval: std::env::var("METRICS_INTERVAL_SECONDS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map_or(defaults.metrics_interval, Duration::from_secs),
            metrics_channel_capacity: std::env::var("METRICS_CHANNEL_CAPACITY")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.metrics_channel_capacity),
            mailbox_capacity: std::env::var("MAILBOX_CAPACITY")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .filter(|capacity| *capacity > 0)
                .unwrap_or(defaults.mailbox_capacity),
        }
    }

    /// Set the metrics reporting interval.
    #[must_use]
    pub fn with_metrics_interval(mut self, interval: Duration) -> Self {
        self.metrics_interval = interval;
        self
    }

    /// Set the mailbox capacity.
    #[must_use]
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            metrics_interval: Duration::from_secs(10),
            metrics_channel_capacity: 16,
            mailbox_capacity: 10_000,
        }
    }
}
