//! Where simulated users send their commands.

use async_trait::async_trait;

use forum_client::{ClientError, ForumClient};
use forum_core::{Command, EngineError};
use forum_engine::EngineHandle;

/// Errors raised while handing a command to its destination.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The in-process engine refused the command.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// The remote service could not be reached or refused the command.
    #[error("remote delivery failed: {0}")]
    Remote(#[from] ClientError),
}

/// A fire-and-forget destination for commands.
///
/// Implementations return once the command has been handed over; they never
/// wait for the engine to apply it.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Hand one command over.
    async fn deliver(&self, command: Command) -> Result<(), SinkError>;
}

#[async_trait]
impl CommandSink for EngineHandle {
    async fn deliver(&self, command: Command) -> Result<(), SinkError> {
        self.tell(command)?;
        Ok(())
    }
}

/// Delivers commands to a forum service over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: ForumClient,
}

impl RemoteSink {
    /// Wrap a client.
    #[must_use]
    pub fn new(client: ForumClient) -> Self {
        Self { client }
    }

    /// The wrapped client, for reading back metrics.
    #[must_use]
    pub fn client(&self) -> &ForumClient {
        &self.client
    }
}

#[async_trait]
impl CommandSink for RemoteSink {
    async fn deliver(&self, command: Command) -> Result<(), SinkError> {
        self.client.deliver(&command).await?;
        Ok(())
    }
}
