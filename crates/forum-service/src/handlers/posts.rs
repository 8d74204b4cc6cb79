//! Post, comment and vote handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use forum_core::{Comment, CreateComment, CreatePost, Post, ThreadEntry, Vote};

use super::{deliver, ApiJson, Delivery, DeliveryQuery};
use crate::error::ApiError;
use crate::state::AppState;

/// Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeliveryQuery>,
    ApiJson(body): ApiJson<CreatePost>,
) -> Result<Delivery, ApiError> {
    deliver(&state, body.into(), &query).await
}

/// Get a post by id.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<Json<Post>, ApiError> {
    state
        .engine
        .engine()
        .post(&post_id)
        .await
        .map(Json)
        .ok_or_else(|| post_not_found(&post_id))
}

/// List every comment indexed under a post, linked or not, in creation order.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let engine = state.engine.engine();
    if engine.post(&post_id).await.is_none() {
        return Err(post_not_found(&post_id));
    }
    Ok(Json(engine.comments_for_post(&post_id).await))
}

/// Get a post's comment tree, flattened depth-first.
pub async fn get_thread(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<Json<Vec<ThreadEntry>>, ApiError> {
    state
        .engine
        .engine()
        .thread(&post_id)
        .await
        .map(Json)
        .ok_or_else(|| post_not_found(&post_id))
}

/// Create a comment or a reply.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeliveryQuery>,
    ApiJson(body): ApiJson<CreateComment>,
) -> Result<Delivery, ApiError> {
    deliver(&state, body.into(), &query).await
}

/// Vote on a post or a comment.
pub async fn vote(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DeliveryQuery>,
    ApiJson(body): ApiJson<Vote>,
) -> Result<Delivery, ApiError> {
    deliver(&state, body.into(), &query).await
}

fn post_not_found(post_id: &str) -> ApiError {
    ApiError::NotFound(format!("post not found: {post_id}"))
}
