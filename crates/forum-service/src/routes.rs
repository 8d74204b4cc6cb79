//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{commands, health, messages, metrics, posts, subreddits, users};
use crate::state::AppState;

/// Maximum concurrent requests for the generic command endpoint.
/// Bulk producers such as the simulator land here.
const COMMANDS_MAX_CONCURRENT_REQUESTS: usize = 256;

/// Maximum concurrent requests for the typed API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 128;

/// Create the service router with all routes and middleware.
///
/// Every `POST` accepts `?sync=true` to wait for the engine's outcome.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Users
/// - `POST /v1/users` - Register a user
/// - `GET /v1/users/:user_id` - Get a user
/// - `GET /v1/users/:user_id/inbox` - List received direct messages
///
/// ## Subreddits
/// - `POST /v1/subreddits` - Create a subreddit
/// - `GET /v1/subreddits/:subreddit_id` - Get a subreddit
/// - `POST /v1/subreddits/:subreddit_id/members` - Join a subreddit
///
/// ## Posts, comments and votes
/// - `POST /v1/posts` - Create a post
/// - `GET /v1/posts/:post_id` - Get a post
/// - `GET /v1/posts/:post_id/comments` - Every comment indexed under a post
/// - `GET /v1/posts/:post_id/thread` - The post's comment tree
/// - `POST /v1/comments` - Create a comment or reply
/// - `POST /v1/votes` - Vote on a post or comment
///
/// ## Messages
/// - `POST /v1/messages` - Send a direct message
///
/// ## Commands and metrics
/// - `POST /v1/commands` - Deliver any tagged command
/// - `GET /v1/metrics` - Current counters
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let command_routes = Router::new()
        .route("/", post(commands::submit_command))
        .layer(ConcurrencyLimitLayer::new(COMMANDS_MAX_CONCURRENT_REQUESTS));

    let api_routes = Router::new()
        // Users
        .route("/users", post(users::register_user))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/inbox", get(users::get_inbox))
        // Subreddits
        .route("/subreddits", post(subreddits::create_subreddit))
        .route("/subreddits/:subreddit_id", get(subreddits::get_subreddit))
        .route(
            "/subreddits/:subreddit_id/members",
            post(subreddits::join_subreddit),
        )
        // Posts
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id/comments", get(posts::list_comments))
        .route("/posts/:post_id/thread", get(posts::get_thread))
        .route("/comments", post(posts::create_comment))
        .route("/votes", post(posts::vote))
        // Messages
        .route("/messages", post(messages::send_message))
        // Metrics
        .route("/metrics", get(metrics::get_metrics))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS))
        // Generic commands (with their own concurrency limit)
        .nest("/commands", command_routes);

    Router::new()
        .route("/health", get(health::health))
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
