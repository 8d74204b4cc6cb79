//! Traffic simulator for the forum engine.
//!
//! Spawns many independent simulated users, each looping forever: with a small
//! probability it goes offline for a long random spell, otherwise it sends one
//! synthetic command and pauses for its own fixed interval. Users are never
//! coordinated with each other and never wait for the engine's outcome, so the
//! result is an uneven, concurrent stream of commands.
//!
//! Commands go to a [`CommandSink`]: an in-process [`forum_engine::EngineHandle`]
//! or a [`RemoteSink`] posting to a forum service.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod simulator;
pub mod sink;
pub mod stats;
pub mod user;

pub use config::SimulatorConfig;
pub use simulator::Simulator;
pub use sink::{CommandSink, RemoteSink, SinkError};
pub use stats::{SimulatorStats, StatsSnapshot};
pub use user::{Action, Activity, SimulatedUser, UserHandle};
