//! Forum Client SDK.
//!
//! This crate provides a client library for delivering commands to a remote
//! forum engine and reading back what it holds.
//!
//! # Example
//!
//! ```no_run
//! use forum_client::ForumClient;
//! use forum_core::RegisterUser;
//!
//! # async fn example() -> Result<(), forum_client::ClientError> {
//! let client = ForumClient::new("http://forum-engine:8080")?;
//!
//! // Fire and forget
//! client
//!     .deliver(&RegisterUser { username: "alice".into() }.into())
//!     .await?;
//!
//! // Wait for the created entity
//! let ack = client
//!     .apply(&RegisterUser { username: "bob".into() }.into())
//!     .await?;
//! println!("{ack:?}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, ForumClient};
pub use error::ClientError;
pub use types::*;
