//! Generic command ingestion.
//!
//! Remote producers such as the traffic simulator post tagged commands here
//! instead of going through the per-entity endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};

use forum_core::Command;

use super::{deliver, ApiJson, Delivery, DeliveryQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// Deliver any command.
pub async fn submit_command(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeliveryQuery>,
    ApiJson(command): ApiJson<Command>,
) -> Result<Delivery, ApiError> {
    deliver(&state, command, &query).await
}
