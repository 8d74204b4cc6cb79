//! Simulated users.
//!
//! Each simulated user is an independent task that loops forever: it either
//! drops offline for a while or sends one synthetic command and then pauses
//! for its own fixed interval. Users never wait for the engine's outcome.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tokio::task::JoinHandle;

use forum_core::{
    Command, CommandKind, CommentId, CreateComment, CreatePost, CreateSubreddit, RegisterUser,
    SendDirectMessage, UserId,
};

use crate::config::SimulatorConfig;
use crate::sink::CommandSink;
use crate::stats::SimulatorStats;

/// The commands a simulated user picks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    /// Create a post in the shared subreddit.
    CreatePost,
    /// Register a user named after this user's id.
    RegisterUser,
    /// Create the shared subreddit (again).
    CreateSubreddit,
    /// Comment on the shared post.
    CreateComment,
    /// Message another simulated user.
    SendDirectMessage,
}

impl Activity {
    /// Every activity, each equally likely.
    pub const ALL: [Self; 5] = [
        Self::CreatePost,
        Self::RegisterUser,
        Self::CreateSubreddit,
        Self::CreateComment,
        Self::SendDirectMessage,
    ];

    /// The command kind this activity sends.
    #[must_use]
    pub const fn kind(self) -> CommandKind {
        match self {
            Self::CreatePost => CommandKind::CreatePost,
            Self::RegisterUser => CommandKind::RegisterUser,
            Self::CreateSubreddit => CommandKind::CreateSubreddit,
            Self::CreateComment => CommandKind::CreateComment,
            Self::SendDirectMessage => CommandKind::SendDirectMessage,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// What a user does on one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Go offline for this long.
    Disconnect(Duration),
    /// Send one command of this kind.
    Dispatch(Activity),
}

/// One synthetic client.
#[derive(Debug, Clone)]
pub struct SimulatedUser {
    id: UserId,
    post_frequency: Duration,
    peers: Arc<[UserId]>,
    config: Arc<SimulatorConfig>,
}

impl SimulatedUser {
    /// Create a user with a pause drawn once from the configured range.
    pub fn new(
        id: UserId,
        peers: Arc<[UserId]>,
        config: Arc<SimulatorConfig>,
        rng: &mut impl Rng,
    ) -> Self {
        let units = rng.gen_range(config.post_frequency_units());
        Self {
            id,
            post_frequency: config.units(units),
            peers,
            config,
        }
    }

    /// This user's id.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// The fixed pause after every dispatched command.
    #[must_use]
    pub fn post_frequency(&self) -> Duration {
        self.post_frequency
    }

    /// Decide what to do next.
    pub fn next_action(&self, rng: &mut impl Rng) -> Action {
        if rng.gen_bool(self.config.disconnect_chance()) {
            let units = rng.gen_range(0..self.config.max_disconnect_units.max(1));
            return Action::Disconnect(self.config.units(units));
        }
        Action::Dispatch(Activity::ALL[rng.gen_range(0..Activity::ALL.len())])
    }

    /// Build the synthetic command for an activity.
    pub fn command(&self, activity: Activity, rng: &mut impl Rng) -> Command {
        match activity {
            Activity::CreatePost => CreatePost {
                title: "Simulated Post Title".into(),
                content: "Simulated Post Content".into(),
                author_id: self.id.clone(),
                subreddit_id: self.config.subreddit_id.clone(),
            }
            .into(),
            Activity::RegisterUser => RegisterUser {
                username: self.id.to_string(),
            }
            .into(),
            Activity::CreateSubreddit => CreateSubreddit {
                name: self.config.subreddit_id.to_string(),
                description: "Simulated Subreddit".into(),
                creator_id: self.id.clone(),
            }
            .into(),
            Activity::CreateComment => CreateComment {
                content: "Simulated Comment Content".into(),
                author_id: self.id.clone(),
                post_id: self.config.post_id.clone(),
                parent_id: CommentId::default(),
            }
            .into(),
            Activity::SendDirectMessage => SendDirectMessage {
                from_user_id: self.id.clone(),
                to_user_id: self.pick_peer(rng),
                content: "Simulated Direct Message".into(),
            }
            .into(),
        }
    }

    /// A random other user, or this user when it has no peers.
    fn pick_peer(&self, rng: &mut impl Rng) -> UserId {
        let others: Vec<&UserId> = self.peers.iter().filter(|peer| **peer != self.id).collect();
        match others.len() {
            0 => self.id.clone(),
            n => others[rng.gen_range(0..n)].clone(),
        }
    }

    /// Start the user loop on its own task.
    pub(crate) fn spawn(
        self,
        sink: Arc<dyn CommandSink>,
        rng: StdRng,
        stats: Arc<SimulatorStats>,
    ) -> UserHandle {
        let id = self.id.clone();
        let post_frequency = self.post_frequency;
        let task = tokio::spawn(self.run(sink, rng, stats));
        UserHandle {
            id,
            post_frequency,
            task,
        }
    }

    async fn run(self, sink: Arc<dyn CommandSink>, mut rng: StdRng, stats: Arc<SimulatorStats>) {
        tracing::debug!(
            user_id = %self.id,
            post_frequency_ms = self.post_frequency.as_millis(),
            "Simulated user started"
        );

        loop {
            match self.next_action(&mut rng) {
                Action::Disconnect(offline) => {
                    stats.record_disconnect();
                    tracing::debug!(
                        user_id = %self.id,
                        offline_ms = offline.as_millis(),
                        "Simulated user disconnected"
                    );
                    tokio::time::sleep(offline).await;
                }
                Action::Dispatch(activity) => {
                    let command = self.command(activity, &mut rng);
                    match sink.deliver(command).await {
                        Ok(()) => {
                            stats.record_dispatch(activity);
                            tracing::trace!(
                                user_id = %self.id,
                                command = %activity.kind(),
                                "Simulated command sent"
                            );
                        }
                        Err(e) => {
                            stats.record_failure();
                            tracing::warn!(
                                user_id = %self.id,
                                command = %activity.kind(),
                                error = %e,
                                "Simulated command not delivered"
                            );
                        }
                    }
                    tokio::time::sleep(self.post_frequency).await;
                }
            }
        }
    }
}

/// A running simulated user.
#[derive(Debug)]
pub struct UserHandle {
    id: UserId,
    post_frequency: Duration,
    task: JoinHandle<()>,
}

impl UserHandle {
    /// The user's id.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// The user's fixed pause between commands.
    #[must_use]
    pub fn post_frequency(&self) -> Duration {
        self.post_frequency
    }

    /// Stop this user. It sends nothing further.
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the user's task has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub(crate) fn into_task(self) -> JoinHandle<()> {
        self.task
    }
}
