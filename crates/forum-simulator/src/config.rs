//! Simulator configuration.

use std::ops::RangeInclusive;
use std::time::Duration;

use forum_core::{PostId, SubredditId};

/// Configuration for a simulation run.
///
/// Timings are expressed in whole time units so a run can be sped up or
/// slowed down by changing [`SimulatorConfig::time_unit`] alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Base URL of a remote forum service. `None` runs an in-process engine.
    pub engine_url: Option<String>,

    /// Number of simulated users (default: 100).
    pub num_users: usize,

    /// Length of one time unit (default: 1s).
    pub time_unit: Duration,

    /// Shortest per-user pause between actions, in time units (default: 1).
    pub min_post_frequency_units: u32,

    /// Longest per-user pause between actions, in time units (default: 10).
    pub max_post_frequency_units: u32,

    /// Chance on each loop iteration that a user goes offline (default: 0.1).
    pub disconnect_probability: f64,

    /// Upper bound, exclusive, of an offline spell in time units (default: 300).
    pub max_disconnect_units: u32,

    /// Subreddit every simulated post is filed under.
    pub subreddit_id: SubredditId,

    /// Post every simulated comment targets.
    pub post_id: PostId,

    /// How often the binary logs dispatch statistics (default: 60s).
    pub report_interval: Duration,

    /// Stop after this long. `None` runs until interrupted.
    pub run_for: Option<Duration>,

    /// Base random seed. Each user draws from `seed + index`.
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            engine_url: std::env::var("FORUM_ENGINE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            num_users: env_parse("SIM_USERS").unwrap_or(defaults.num_users),
            time_unit: env_parse::<u64>("SIM_TIME_UNIT_MS")
                .filter(|ms| *ms > 0)
                .map_or(defaults.time_unit, Duration::from_millis),
            min_post_frequency_units: env_parse("SIM_MIN_POST_FREQUENCY")
                .unwrap_or(defaults.min_post_frequency_units),
            max_post_frequency_units: env_parse("SIM_MAX_POST_FREQUENCY")
                .unwrap_or(defaults.max_post_frequency_units),
            disconnect_probability: env_parse::<f64>("SIM_DISCONNECT_PROBABILITY")
                .filter(|p| p.is_finite())
                .unwrap_or(defaults.disconnect_probability),
            max_disconnect_units: env_parse("SIM_MAX_DISCONNECT")
                .unwrap_or(defaults.max_disconnect_units),
            subreddit_id: std::env::var("SIM_SUBREDDIT_ID")
                .map_or(defaults.subreddit_id, SubredditId::new),
            post_id: std::env::var("SIM_POST_ID").map_or(defaults.post_id, PostId::new),
            report_interval: env_parse::<u64>("SIM_REPORT_INTERVAL_SECONDS")
                .filter(|secs| *secs > 0)
                .map_or(defaults.report_interval, Duration::from_secs),
            run_for: env_parse::<u64>("SIM_DURATION_SECONDS").map(Duration::from_secs),
            seed: env_parse("SIM_SEED"),
        }
    }

    /// Target a remote forum service.
    #[must_use]
    pub fn with_engine_url(mut self, url: impl Into<String>) -> Self {
        self.engine_url = Some(url.into());
        self
    }

    /// Set the number of simulated users.
    #[must_use]
    pub fn with_users(mut self, num_users: usize) -> Self {
        self.num_users = num_users;
        self
    }

    /// Set the length of one time unit.
    #[must_use]
    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// Set the range per-user action pauses are drawn from, in time units.
    #[must_use]
    pub fn with_post_frequency_units(mut self, min: u32, max: u32) -> Self {
        self.min_post_frequency_units = min;
        self.max_post_frequency_units = max;
        self
    }

    /// Set the per-iteration disconnect chance.
    #[must_use]
    pub fn with_disconnect_probability(mut self, probability: f64) -> Self {
        self.disconnect_probability = probability;
        self
    }

    /// Set the exclusive upper bound of an offline spell, in time units.
    #[must_use]
    pub fn with_max_disconnect_units(mut self, units: u32) -> Self {
        self.max_disconnect_units = units;
        self
    }

    /// Stop the run after `duration`.
    #[must_use]
    pub fn with_run_for(mut self, duration: Duration) -> Self {
        self.run_for = Some(duration);
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Per-user pause range in time units; never empty and never zero.
    #[must_use]
    pub fn post_frequency_units(&self) -> RangeInclusive<u32> {
        let min = self.min_post_frequency_units.max(1);
        let max = self.max_post_frequency_units.max(min);
        min..=max
    }

    /// The disconnect chance as a valid probability.
    #[must_use]
    pub fn disconnect_chance(&self) -> f64 {
        if self.disconnect_probability.is_nan() {
            0.0
        } else {
            self.disconnect_probability.clamp(0.0, 1.0)
        }
    }

    /// `units` time units as a duration.
    #[must_use]
    pub fn units(&self, units: u32) -> Duration {
        self.time_unit * units
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            engine_url: None,
            num_users: 100,
            time_unit: Duration::from_secs(1),
            min_post_frequency_units: 1,
            max_post_frequency_units: 10,
            disconnect_probability: 0.1,
            max_disconnect_units: 300,
            subreddit_id: SubredditId::new("subreddit-1"),
            post_id: PostId::new("post-1"),
            report_interval: Duration::from_secs(60),
            run_for: None,
            seed: None,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SimulatorConfig::default();

        assert_eq!(config.post_frequency_units(), 1..=10);
        assert_eq!(config.units(300), Duration::from_secs(300));
        assert_eq!(config.subreddit_id.as_str(), "subreddit-1");
        assert!(config.engine_url.is_none());
    }

    #[test]
    fn inverted_frequency_range_collapses_to_min() {
        let config = SimulatorConfig::default().with_post_frequency_units(0, 0);
        assert_eq!(config.post_frequency_units(), 1..=1);

        let config = SimulatorConfig::default().with_post_frequency_units(5, 2);
        assert_eq!(config.post_frequency_units(), 5..=5);
    }

    #[test]
    fn disconnect_chance_is_a_probability() {
        let over = SimulatorConfig::default().with_disconnect_probability(1.5);
        let under = SimulatorConfig::default().with_disconnect_probability(-0.5);
        let nan = SimulatorConfig::default().with_disconnect_probability(f64::NAN);

        assert!((over.disconnect_chance() - 1.0).abs() < f64::EPSILON);
        assert!(under.disconnect_chance().abs() < f64::EPSILON);
        assert!(nan.disconnect_chance().abs() < f64::EPSILON);
    }

    #[test]
    fn builder_setters_chain() {
        let config = SimulatorConfig::default()
            .with_users(3)
            .with_time_unit(Duration::from_millis(10))
            .with_seed(7)
            .with_engine_url("http://localhost:8080");

        assert_eq!(config.num_users, 3);
        assert_eq!(config.units(2), Duration::from_millis(20));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.engine_url.as_deref(), Some("http://localhost:8080"));
    }
}
