//! Concurrent command engine for the forum.
//!
//! The [`Engine`] owns every domain table and applies [`forum_core::Command`]s
//! against them. Any number of producers may share it:
//!
//! - In-process callers hold an `Arc<Engine>` and call [`Engine::apply`]
//!   (outcome returned) or [`Engine::send`] (fire-and-forget) concurrently;
//!   the table lock serializes the mutations.
//! - The HTTP service and the simulator hold an [`EngineHandle`] from
//!   [`Engine::spawn`] and `tell` or `ask` through a FIFO mailbox.
//!
//! # Example
//!
//! ```no_run
//! use forum_core::{Ack, RegisterUser};
//! use forum_engine::{Engine, EngineConfig};
//!
//! # async fn example() {
//! let engine = Engine::shared(EngineConfig::default());
//! let (handle, _task) = engine.spawn();
//!
//! let ack = handle
//!     .ask(RegisterUser { username: "alice".into() }.into())
//!     .await
//!     .unwrap();
//! if let Ack::UserRegistered(user) = ack {
//!     println!("registered {}", user.id);
//! }
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod handle;
pub mod metrics;
mod reporter;
mod tables;

pub use config::EngineConfig;
pub use engine::Engine;
pub use handle::EngineHandle;
pub use metrics::MetricsCounter;
