//! Metrics handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use forum_core::MetricsSnapshot;

use crate::state::AppState;

/// Current counters and the engine start time.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.engine.engine().metrics().await)
}
