//! Direct message handlers.

use std::sync::Arc;

use axum::extract::{Query, State};

use forum_core::SendDirectMessage;

use super::{deliver, ApiJson, Delivery, DeliveryQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// Send a direct message.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeliveryQuery>,
    ApiJson(body): ApiJson<SendDirectMessage>,
) -> Result<Delivery, ApiError> {
    deliver(&state, body.into(), &query).await
}
