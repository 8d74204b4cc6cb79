//! Error types for the forum engine.
//!
//! Every variant is a non-fatal rejection: the command changed nothing (or, for
//! [`EngineError::ParentNotFound`], only indexed the comment by post) and the
//! engine keeps running.

use crate::{CommandKind, CommentId, PostId, SubredditId, TargetId, UserId};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Reasons the engine rejects a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A required reference field was empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// The referenced post does not exist.
    #[error("post not found: {post_id}")]
    PostNotFound {
        /// The missing post.
        post_id: PostId,
    },

    /// The parent comment does not exist under the post.
    ///
    /// The new comment is still indexed under its post but is not linked into
    /// the thread.
    #[error("parent comment {parent_id} not found under post {post_id}")]
    ParentNotFound {
        /// The comment that was indexed but not linked.
        comment_id: CommentId,
        /// The missing parent.
        parent_id: CommentId,
        /// The post that was searched.
        post_id: PostId,
    },

    /// Neither a post nor a comment has this id.
    #[error("vote target not found: {target_id}")]
    TargetNotFound {
        /// The unresolved target.
        target_id: TargetId,
    },

    /// The referenced user does not exist.
    #[error("user not found: {user_id}")]
    UserNotFound {
        /// The missing user.
        user_id: UserId,
    },

    /// The referenced subreddit does not exist.
    #[error("subreddit not found: {subreddit_id}")]
    SubredditNotFound {
        /// The missing subreddit.
        subreddit_id: SubredditId,
    },

    /// The engine does not handle this kind of command.
    #[error("unhandled command: {kind}")]
    Unhandled {
        /// The ignored command kind.
        kind: CommandKind,
    },

    /// The engine mailbox is full; the command was not queued.
    #[error("engine overloaded: mailbox holds {capacity} commands")]
    Overloaded {
        /// Mailbox capacity.
        capacity: usize,
    },

    /// The engine mailbox is closed.
    #[error("engine stopped")]
    EngineStopped,
}

impl EngineError {
    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::PostNotFound { .. } => "post_not_found",
            Self::ParentNotFound { .. } => "parent_not_found",
            Self::TargetNotFound { .. } => "target_not_found",
            Self::UserNotFound { .. } => "user_not_found",
            Self::SubredditNotFound { .. } => "subreddit_not_found",
            Self::Unhandled { .. } => "unhandled_command",
            Self::Overloaded { .. } => "engine_overloaded",
            Self::EngineStopped => "engine_stopped",
        }
    }

    /// Whether this is a referential-integrity failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound { .. }
                | Self::ParentNotFound { .. }
                | Self::TargetNotFound { .. }
                | Self::UserNotFound { .. }
                | Self::SubredditNotFound { .. }
        )
    }
}
