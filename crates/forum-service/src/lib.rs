//! Forum HTTP API service.
//!
//! This crate is the network front door of the forum engine:
//!
//! - Typed endpoints that build one command each (users, subreddits, posts,
//!   comments, votes, direct messages)
//! - A generic `POST /v1/commands` endpoint accepting any tagged command
//! - Read endpoints over the engine's tables and metrics
//!
//! # Delivery
//!
//! Mutating endpoints are fire-and-forget by default: the command is queued on
//! the engine's mailbox and the response is `202 Accepted` whatever the
//! eventual outcome. Adding `?sync=true` waits for the engine and returns the
//! created entity, or the rejection as a JSON error.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Read handlers are async for uniformity

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
