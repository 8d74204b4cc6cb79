//! The engine: sole owner of the forum's domain state.

use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use forum_core::{
    Ack, Command, Comment, DirectMessage, MetricsSnapshot, Post, Result, Subreddit, ThreadEntry,
    User,
};

use crate::config::EngineConfig;
use crate::metrics::MetricsCounter;
use crate::tables::Tables;

/// The single authority over users, subreddits, posts, comments and inboxes.
///
/// Safe to share across tasks behind an [`Arc`]. Every mutation takes the
/// table lock for its whole read-modify-write, so at most one mutation is in
/// flight at a time; the metrics counter has a lock of its own and is bumped
/// after the table lock is released.
///
/// Two operation shapes are offered:
///
/// - [`Engine::apply`] returns the outcome to the caller.
/// - [`Engine::send`] is fire-and-forget: rejections are only logged.
pub struct Engine {
    tables: RwLock<Tables>,
    metrics: MetricsCounter,
    metrics_events: broadcast::Sender<MetricsSnapshot>,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with empty tables.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let (metrics_events, _) = broadcast::channel(config.metrics_channel_capacity.max(1));
        Self {
            tables: RwLock::new(Tables::default()),
            metrics: MetricsCounter::new(),
            metrics_events,
            config,
        }
    }

    /// Create an engine already wrapped for sharing.
    #[must_use]
    pub fn shared(config: EngineConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    /// The configuration this engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply a command and return what it created or mutated.
    ///
    /// # Errors
    ///
    /// Returns the [`forum_core::EngineError`] rejection when the command is
    /// missing a required field, references something that does not exist, or
    /// is not handled. A rejected command leaves the counters untouched.
    pub async fn apply(&self, command: Command) -> Result<Ack> {
        let kind = command.kind();
        tracing::debug!(command = %kind, "Engine received command");

        let outcome = self.tables.write().await.apply(command);

        match outcome {
            Ok(ack) => {
                if let Some(counter) = ack.counter() {
                    let total = self.metrics.increment(counter).await;
                    tracing::trace!(?counter, total, "Metrics counter incremented");
                }
                log_ack(&ack);
                Ok(ack)
            }
            Err(err) => {
                tracing::warn!(command = %kind, code = err.code(), error = %err, "Command rejected");
                Err(err)
            }
        }
    }

    /// Apply a command without reporting the outcome.
    pub async fn send(&self, command: Command) {
        // Rejections are already logged by `apply`.
        let _ = self.apply(command).await;
    }

    /// Copy out the current counters.
    pub async fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot().await
    }

    /// Subscribe to the periodic metrics snapshots emitted once the engine is
    /// spawned.
    #[must_use]
    pub fn subscribe_metrics(&self) -> broadcast::Receiver<MetricsSnapshot> {
        self.metrics_events.subscribe()
    }

    /// Take a snapshot and publish it to subscribers.
    pub(crate) async fn publish_metrics(&self) -> MetricsSnapshot {
        let snapshot = self.metrics().await;
        // No subscribers is fine.
        let _ = self.metrics_events.send(snapshot.clone());
        snapshot
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Look up a user.
    pub async fn user(&self, id: &str) -> Option<User> {
        self.tables.read().await.user(id).cloned()
    }

    /// Number of registered users.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.user_count()
    }

    /// Look up a subreddit.
    pub async fn subreddit(&self, id: &str) -> Option<Subreddit> {
        self.tables.read().await.subreddit(id).cloned()
    }

    /// Look up a post.
    pub async fn post(&self, id: &str) -> Option<Post> {
        self.tables.read().await.post(id).cloned()
    }

    /// Look up a comment.
    pub async fn comment(&self, id: &str) -> Option<Comment> {
        self.tables.read().await.comment(id).cloned()
    }

    /// Every comment indexed under a post, including replies whose parent was
    /// never found, in creation order.
    pub async fn comments_for_post(&self, post_id: &str) -> Vec<Comment> {
        self.tables.read().await.comments_for_post(post_id)
    }

    /// The linked comment tree of a post, depth-first with each entry's reply
    /// depth, or `None` if the post does not exist.
    pub async fn thread(&self, post_id: &str) -> Option<Vec<ThreadEntry>> {
        self.tables.read().await.thread(post_id)
    }

    /// A user's received direct messages, oldest first.
    pub async fn inbox(&self, user_id: &str) -> Vec<DirectMessage> {
        self.tables.read().await.inbox(user_id)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn log_ack(ack: &Ack) {
    match ack {
        Ack::UserRegistered(user) => {
            tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        }
        Ack::SubredditCreated(subreddit) => {
            tracing::info!(subreddit_id = %subreddit.id, name = %subreddit.name, "Subreddit created");
        }
        Ack::SubredditJoined(subreddit) => {
            tracing::info!(
                subreddit_id = %subreddit.id,
                members = subreddit.members.len(),
                "Subreddit joined"
            );
        }
        Ack::PostCreated(post) => {
            tracing::info!(
                post_id = %post.id,
                author_id = %post.author_id,
                subreddit_id = %post.subreddit_id,
                "Post created"
            );
        }
        Ack::CommentCreated(comment) => {
            tracing::info!(
                comment_id = %comment.id,
                post_id = %comment.post_id,
                root = comment.is_root(),
                "Comment created"
            );
        }
        Ack::Voted(receipt) => {
            tracing::debug!(
                target_id = %receipt.target_id,
                target = ?receipt.target,
                upvotes = receipt.upvotes,
                downvotes = receipt.downvotes,
                "Vote counted"
            );
        }
        Ack::MessageSent(message) => {
            tracing::debug!(
                message_id = %message.id,
                from = %message.from_user_id,
                to = %message.to_user_id,
                "Direct message sent"
            );
        }
    }
}
