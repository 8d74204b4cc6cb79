//! Core types for the forum engine.
//!
//! This crate provides the passive domain model shared by the engine, the HTTP
//! service, the client SDK and the traffic simulator:
//!
//! - **Identifiers**: `UserId`, `SubredditId`, `PostId`, `CommentId`,
//!   `MessageId`, `TargetId`, and the `IdGenerator` that mints them
//! - **Entities**: `User`, `Subreddit`, `Post`, `Comment`, `DirectMessage`
//! - **Commands**: `Command` and its payloads, plus the `Ack` snapshots the
//!   synchronous path returns
//! - **Metrics**: `MetricsSnapshot`, `Counter`
//! - **Errors**: `EngineError`
//!
//! Nothing here performs I/O or locking; the engine owns all mutation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ack;
pub mod command;
pub mod error;
pub mod ids;
pub mod message;
pub mod metrics;
pub mod post;
pub mod subreddit;
pub mod user;

pub use ack::{Ack, VoteReceipt, VoteTarget};
pub use command::{
    Command, CommandKind, CreateComment, CreatePost, CreateSubreddit, GetFeed, JoinSubreddit,
    RegisterUser, SendDirectMessage, Vote,
};
pub use error::{EngineError, Result};
pub use ids::{CommentId, IdGenerator, MessageId, PostId, SubredditId, TargetId, UserId};
pub use message::DirectMessage;
pub use metrics::{Counter, MetricsSnapshot};
pub use post::{Comment, Post, ThreadEntry};
pub use subreddit::Subreddit;
pub use user::User;
