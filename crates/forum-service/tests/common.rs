//! Common test utilities for forum service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};

use forum_engine::EngineConfig;
use forum_service::{create_router, AppState, ServiceConfig};

/// Test harness wrapping a service with a fresh engine.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
}

impl TestHarness {
    /// Create a new test harness. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
            engine: EngineConfig::default(),
        };

        let state = AppState::new(config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server }
    }

    /// POST with `?sync=true` and return the acknowledged entity.
    pub async fn apply(&self, path: &str, body: Value) -> Value {
        let response = self
            .server
            .post(&format!("{path}?sync=true"))
            .json(&body)
            .await;
        response.assert_status_ok();
        let ack: Value = response.json();
        ack["entity"].clone()
    }

    /// Register a user and return its id.
    pub async fn register(&self, username: &str) -> String {
        let user = self
            .apply("/v1/users", json!({ "username": username }))
            .await;
        id_of(&user)
    }

    /// Create a subreddit and return its id.
    pub async fn create_subreddit(&self, name: &str, creator_id: &str) -> String {
        let subreddit = self
            .apply(
                "/v1/subreddits",
                json!({ "name": name, "description": "desc", "creator_id": creator_id }),
            )
            .await;
        id_of(&subreddit)
    }

    /// Create a post and return its id.
    pub async fn create_post(&self, author_id: &str, subreddit_id: &str) -> String {
        let post = self
            .apply(
                "/v1/posts",
                json!({
                    "title": "hi",
                    "content": "body",
                    "author_id": author_id,
                    "subreddit_id": subreddit_id
                }),
            )
            .await;
        id_of(&post)
    }

    /// Current metrics as JSON.
    pub async fn metrics(&self) -> Value {
        let response = self.server.get("/v1/metrics").await;
        response.assert_status_ok();
        response.json()
    }
}

fn id_of(entity: &Value) -> String {
    entity["id"]
        .as_str()
        .expect("entity has a string id")
        .to_string()
}
