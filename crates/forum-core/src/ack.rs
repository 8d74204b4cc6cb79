//! Acknowledgements returned by the synchronous command path.

use serde::{Deserialize, Serialize};

use crate::metrics::Counter;
use crate::{Comment, DirectMessage, Post, Subreddit, TargetId, User};

/// Snapshot of the entity a successful command created or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "entity", rename_all = "snake_case")]
pub enum Ack {
    /// A user was registered.
    UserRegistered(User),
    /// A subreddit was created.
    SubredditCreated(Subreddit),
    /// A user joined a subreddit.
    SubredditJoined(Subreddit),
    /// A post was created.
    PostCreated(Post),
    /// A comment was created and linked into its thread.
    CommentCreated(Comment),
    /// A vote was counted.
    Voted(VoteReceipt),
    /// A direct message was delivered to an inbox.
    MessageSent(DirectMessage),
}

impl Ack {
    /// The metrics counter this outcome moves, if any.
    #[must_use]
    pub const fn counter(&self) -> Option<Counter> {
        match self {
            Self::UserRegistered(_) => Some(Counter::ActiveUsers),
            Self::PostCreated(_) => Some(Counter::Posts),
            Self::CommentCreated(_) => Some(Counter::Comments),
            Self::Voted(_) => Some(Counter::Votes),
            Self::MessageSent(_) => Some(Counter::Messages),
            Self::SubredditCreated(_) | Self::SubredditJoined(_) => None,
        }
    }
}

/// What a vote landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteTarget {
    /// A post.
    Post,
    /// A comment.
    Comment,
}

/// Result of a counted vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    /// The voted-on id.
    pub target_id: TargetId,
    /// Whether it resolved to a post or a comment.
    pub target: VoteTarget,
    /// Upvotes after this vote.
    pub upvotes: u64,
    /// Downvotes after this vote.
    pub downvotes: u64,
}
