//! Mailbox front-end for the engine.
//!
//! A spawned engine drains a bounded FIFO mailbox on one task, so commands
//! from any single sender are applied in the order they were sent. Producers
//! never wait on the engine unless they ask for a reply; a `tell` into a full
//! mailbox is refused instead of queued.

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use forum_core::{Ack, Command, EngineError, Result};

use crate::engine::Engine;
use crate::reporter;

struct Envelope {
    command: Command,
    reply: Option<oneshot::Sender<Result<Ack>>>,
}

/// Cloneable address of a running engine.
#[derive(Clone)]
pub struct EngineHandle {
    mailbox: mpsc::Sender<Envelope>,
    engine: Arc<Engine>,
}

impl EngineHandle {
    /// Enqueue a command and return immediately.
    ///
    /// The outcome is not reported back; rejections are logged by the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Overloaded`] if the mailbox is full, or
    /// [`EngineError::EngineStopped`] if it is closed.
    pub fn tell(&self, command: Command) -> Result<()> {
        self.mailbox
            .try_send(Envelope {
                command,
                reply: None,
            })
            .map_err(|err| match err {
                TrySendError::Full(_) => EngineError::Overloaded {
                    capacity: self.mailbox.max_capacity(),
                },
                TrySendError::Closed(_) => EngineError::EngineStopped,
            })
    }

    /// Enqueue a command and wait for its outcome.
    ///
    /// Waits for mailbox space when the mailbox is full.
    ///
    /// # Errors
    ///
    /// Returns the engine's rejection, or [`EngineError::EngineStopped`] if the
    /// mailbox closed before the command was applied.
    pub async fn ask(&self, command: Command) -> Result<Ack> {
        let (reply, outcome) = oneshot::channel();
        self.mailbox
            .send(Envelope {
                command,
                reply: Some(reply),
            })
            .await
            .map_err(|_| EngineError::EngineStopped)?;
        outcome.await.map_err(|_| EngineError::EngineStopped)?
    }

    /// The engine behind this handle, for reads and direct `apply` calls.
    #[must_use]
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("closed", &self.mailbox.is_closed())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Start the engine's mailbox and metrics reporter.
    ///
    /// Returns a handle for delivering commands and the mailbox task, which
    /// finishes once every handle has been dropped.
    #[must_use]
    pub fn spawn(self: Arc<Self>) -> (EngineHandle, JoinHandle<()>) {
        let (mailbox, inbox) = mpsc::channel(self.config().mailbox_capacity.max(1));
        let handle = EngineHandle {
            mailbox,
            engine: Arc::clone(&self),
        };
        let task = tokio::spawn(run(self, inbox));
        (handle, task)
    }
}

async fn run(engine: Arc<Engine>, mut inbox: mpsc::Receiver<Envelope>) {
    let reporter = reporter::spawn(Arc::clone(&engine), engine.config().metrics_interval);
    tracing::info!(
        metrics_interval_secs = engine.config().metrics_interval.as_secs(),
        "Engine started and ready to receive commands"
    );

    while let Some(Envelope { command, reply }) = inbox.recv().await {
        match reply {
            Some(reply) => {
                let outcome = engine.apply(command).await;
                // The asker may have given up waiting.
                let _ = reply.send(outcome);
            }
            None => engine.send(command).await,
        }
    }

    reporter.abort();
    tracing::info!("Engine mailbox closed");
}
