//! The command set.
//!
//! A [`Command`] is an immutable request for one domain mutation. Commands are
//! transport-agnostic: they serialize as tagged JSON objects such as
//! `{"type": "create_post", "title": "...", ...}` so any front door can build
//! them and deliver them to the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CommentId, PostId, SubredditId, TargetId, UserId};

/// Register a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUser {
    /// Requested username. Not checked for uniqueness.
    pub username: String,
}

/// Create a new subreddit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubreddit {
    /// Display name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Creating user.
    #[serde(default)]
    pub creator_id: UserId,
}

/// Join a user to a subreddit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSubreddit {
    /// Joining user; must exist.
    pub user_id: UserId,
    /// Subreddit to join; must exist.
    pub subreddit_id: SubredditId,
}

/// Create a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePost {
    /// Title line.
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// Author; must be non-empty.
    #[serde(default)]
    pub author_id: UserId,
    /// Subreddit; must be non-empty.
    #[serde(default)]
    pub subreddit_id: SubredditId,
}

/// Create a comment, optionally as a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateComment {
    /// Body text.
    pub content: String,
    /// Author.
    #[serde(default)]
    pub author_id: UserId,
    /// Post being commented on; must exist.
    pub post_id: PostId,
    /// Parent comment under the same post, or empty for a root comment.
    #[serde(default)]
    pub parent_id: CommentId,
}

/// Vote on a post or a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Voting user.
    #[serde(default)]
    pub user_id: UserId,
    /// Post or comment id.
    pub target_id: TargetId,
    /// `true` for an upvote, `false` for a downvote.
    pub is_upvote: bool,
}

/// Request a user's feed. Reserved; the engine does not handle it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFeed {
    /// The requesting user.
    pub user_id: UserId,
}

/// Send a direct message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendDirectMessage {
    /// Sender.
    pub from_user_id: UserId,
    /// Recipient.
    pub to_user_id: UserId,
    /// Message body.
    pub content: String,
}

/// A request for one domain mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// See [`RegisterUser`].
    RegisterUser(RegisterUser),
    /// See [`CreateSubreddit`].
    CreateSubreddit(CreateSubreddit),
    /// See [`JoinSubreddit`].
    JoinSubreddit(JoinSubreddit),
    /// See [`CreatePost`].
    CreatePost(CreatePost),
    /// See [`CreateComment`].
    CreateComment(CreateComment),
    /// See [`Vote`].
    Vote(Vote),
    /// See [`GetFeed`].
    GetFeed(GetFeed),
    /// See [`SendDirectMessage`].
    SendDirectMessage(SendDirectMessage),
}

impl Command {
    /// The kind of this command, for logging and accounting.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::RegisterUser(_) => CommandKind::RegisterUser,
            Self::CreateSubreddit(_) => CommandKind::CreateSubreddit,
            Self::JoinSubreddit(_) => CommandKind::JoinSubreddit,
            Self::CreatePost(_) => CommandKind::CreatePost,
            Self::CreateComment(_) => CommandKind::CreateComment,
            Self::Vote(_) => CommandKind::Vote,
            Self::GetFeed(_) => CommandKind::GetFeed,
            Self::SendDirectMessage(_) => CommandKind::SendDirectMessage,
        }
    }
}

macro_rules! impl_into_command {
    ($($payload:ident),* $(,)?) => {
        $(
            impl From<$payload> for Command {
                fn from(payload: $payload) -> Self {
                    Self::$payload(payload)
                }
            }
        )*
    };
}

impl_into_command!(
    RegisterUser,
    CreateSubreddit,
    JoinSubreddit,
    CreatePost,
    CreateComment,
    Vote,
    GetFeed,
    SendDirectMessage,
);

/// Discriminant of a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Register a user.
    RegisterUser,
    /// Create a subreddit.
    CreateSubreddit,
    /// Join a subreddit.
    JoinSubreddit,
    /// Create a post.
    CreatePost,
    /// Create a comment.
    CreateComment,
    /// Vote on a post or comment.
    Vote,
    /// Fetch a feed (reserved).
    GetFeed,
    /// Send a direct message.
    SendDirectMessage,
}

impl CommandKind {
    /// The `snake_case` name, matching the serialized `type` tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegisterUser => "register_user",
            Self::CreateSubreddit => "create_subreddit",
            Self::JoinSubreddit => "join_subreddit",
            Self::CreatePost => "create_post",
            Self::CreateComment => "create_comment",
            Self::Vote => "vote",
            Self::GetFeed => "get_feed",
            Self::SendDirectMessage => "send_direct_message",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
