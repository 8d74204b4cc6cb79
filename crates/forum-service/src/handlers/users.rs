//! User handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use forum_core::{DirectMessage, RegisterUser, User};

use super::{deliver, ApiJson, Delivery, DeliveryQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// Register a user.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeliveryQuery>,
    ApiJson(body): ApiJson<RegisterUser>,
) -> Result<Delivery, ApiError> {
    deliver(&state, body.into(), &query).await
}

/// Get a user by id.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    state
        .engine
        .engine()
        .user(&user_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("user not found: {user_id}")))
}

/// List the direct messages a user has received, oldest first.
///
/// Users that were never messaged have an empty inbox, registered or not.
pub async fn get_inbox(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Json<Vec<DirectMessage>> {
    Json(state.engine.engine().inbox(&user_id).await)
}
