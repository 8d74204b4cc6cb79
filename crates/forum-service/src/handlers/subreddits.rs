//! Subreddit handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use forum_core::{CreateSubreddit, JoinSubreddit, Subreddit, SubredditId, UserId};

use super::{deliver, ApiJson, Delivery, DeliveryQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// Join request body.
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    /// The joining user.
    pub user_id: UserId,
}

/// Create a subreddit.
pub async fn create_subreddit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeliveryQuery>,
    ApiJson(body): ApiJson<CreateSubreddit>,
) -> Result<Delivery, ApiError> {
    deliver(&state, body.into(), &query).await
}

/// Get a subreddit by id.
pub async fn get_subreddit(
    State(state): State<Arc<AppState>>,
    Path(subreddit_id): Path<String>,
) -> Result<Json<Subreddit>, ApiError> {
    state
        .engine
        .engine()
        .subreddit(&subreddit_id)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("subreddit not found: {subreddit_id}")))
}

/// Add a user to a subreddit's members.
pub async fn join_subreddit(
    State(state): State<Arc<AppState>>,
    Path(subreddit_id): Path<String>,
    Query(query): Query<DeliveryQuery>,
    ApiJson(body): ApiJson<JoinRequest>,
) -> Result<Delivery, ApiError> {
    let command = JoinSubreddit {
        user_id: body.user_id,
        subreddit_id: SubredditId::new(subreddit_id),
    };
    deliver(&state, command.into(), &query).await
}
