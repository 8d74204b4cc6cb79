//! The simulator: starts, tracks and stops simulated users.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use forum_core::{IdGenerator, UserId};

use crate::config::SimulatorConfig;
use crate::sink::CommandSink;
use crate::stats::{SimulatorStats, StatsSnapshot};
use crate::user::{SimulatedUser, UserHandle};

/// A running population of simulated users.
#[derive(Debug)]
pub struct Simulator {
    users: Vec<UserHandle>,
    stats: Arc<SimulatorStats>,
    seed: u64,
}

impl Simulator {
    /// Spawn `config.num_users` users, all sending to `sink`.
    ///
    /// Must be called from within a tokio runtime. Users run until cancelled
    /// or until [`Simulator::shutdown`].
    #[must_use]
    pub fn start(config: SimulatorConfig, sink: Arc<dyn CommandSink>) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let config = Arc::new(config);
        let stats = Arc::new(SimulatorStats::new());

        let mut ids = IdGenerator::new();
        let peers: Arc<[UserId]> = (0..config.num_users).map(|_| ids.next_id()).collect();

        let users = peers
            .iter()
            .zip(0u64..)
            .map(|(id, index)| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index));
                let user =
                    SimulatedUser::new(id.clone(), Arc::clone(&peers), Arc::clone(&config), &mut rng);
                user.spawn(Arc::clone(&sink), rng, Arc::clone(&stats))
            })
            .collect::<Vec<_>>();

        tracing::info!(
            users = users.len(),
            seed,
            subreddit_id = %config.subreddit_id,
            post_id = %config.post_id,
            time_unit_ms = config.time_unit.as_millis(),
            "Simulator started"
        );

        Self { users, stats, seed }
    }

    /// The running users.
    #[must_use]
    pub fn users(&self) -> &[UserHandle] {
        &self.users
    }

    /// The base seed this run draws from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stop one user. Returns `false` if no user has that id.
    pub fn cancel_user(&self, user_id: &str) -> bool {
        match self.users.iter().find(|user| user.id().as_str() == user_id) {
            Some(user) => {
                user.cancel();
                tracing::debug!(user_id, "Simulated user cancelled");
                true
            }
            None => false,
        }
    }

    /// Copy out the dispatch counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Stop every user and wait for their tasks to end.
    pub async fn shutdown(self) -> StatsSnapshot {
        for user in &self.users {
            user.cancel();
        }
        let tasks = self.users.into_iter().map(UserHandle::into_task);
        // Cancelled tasks resolve to a cancellation error.
        let _ = futures::future::join_all(tasks).await;

        let stats = self.stats.snapshot();
        tracing::info!(
            dispatched = stats.total_dispatched(),
            disconnects = stats.disconnects,
            failures = stats.failures,
            "Simulator stopped"
        );
        stats
    }
}
