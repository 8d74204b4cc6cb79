//! Application state.

use forum_engine::{Engine, EngineHandle};

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Mailbox handle of the engine this service fronts.
    pub engine: EngineHandle,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Start a fresh engine and wrap it for the router.
    ///
    /// Must be called from within a tokio runtime. The engine runs until every
    /// clone of the state has been dropped.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let (engine, _task) = Engine::shared(config.engine.clone()).spawn();
        tracing::info!(
            metrics_interval_secs = config.engine.metrics_interval.as_secs(),
            "Engine spawned"
        );
        Self { engine, config }
    }

    /// Front an engine that is already running.
    #[must_use]
    pub fn with_engine(engine: EngineHandle, config: ServiceConfig) -> Self {
        Self { engine, config }
    }
}
