//! Forum HTTP client implementation.

use reqwest::{Client, StatusCode};
use std::time::Duration;

use forum_core::{Ack, Command, DirectMessage, MetricsSnapshot, Post, Subreddit, ThreadEntry, User};

use crate::error::ClientError;
use crate::types::{Accepted, ApiErrorResponse, HealthResponse};

/// Forum API client.
///
/// Delivers commands to a remote engine and reads back entities and metrics.
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ForumClient {
    client: Client,
    base_url: String,
    client_name: String,
}

impl ForumClient {
    /// Create a new forum client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the forum service (e.g., `"http://forum-engine:8080"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an http(s) URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new forum client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an http(s) URL or the HTTP client
    /// cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Configuration(format!(
                "base URL must be http(s): {base_url:?}"
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            client_name: options.client_name,
        })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Queue a command on the remote engine without waiting for its outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server refuses the
    /// command. Engine-side rejections are not reported on this path.
    pub async fn deliver(&self, command: &Command) -> Result<Accepted, ClientError> {
        let url = format!("{}/v1/commands", self.base_url);
        tracing::trace!(command = %command.kind(), "Delivering command");

        let response = self
            .client
            .post(&url)
            .header("x-client-name", &self.client_name)
            .json(command)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Apply a command on the remote engine and return what it created or
    /// mutated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the engine rejects the
    /// command.
    pub async fn apply(&self, command: &Command) -> Result<Ack, ClientError> {
        let url = format!("{}/v1/commands", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("sync", "true")])
            .header("x-client-name", &self.client_name)
            .json(command)
            .send()
            .await?;

        self.handle_response(response).await
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the user does not exist, or another
    /// error if the request fails.
    pub async fn get_user(&self, user_id: &str) -> Result<User, ClientError> {
        self.get(&format!("/v1/users/{user_id}")).await
    }

    /// List the direct messages a user has received.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_inbox(&self, user_id: &str) -> Result<Vec<DirectMessage>, ClientError> {
        self.get(&format!("/v1/users/{user_id}/inbox")).await
    }

    /// Get a subreddit by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the subreddit does not exist, or
    /// another error if the request fails.
    pub async fn get_subreddit(&self, subreddit_id: &str) -> Result<Subreddit, ClientError> {
        self.get(&format!("/v1/subreddits/{subreddit_id}")).await
    }

    /// Get a post by id.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the post does not exist, or another
    /// error if the request fails.
    pub async fn get_post(&self, post_id: &str) -> Result<Post, ClientError> {
        self.get(&format!("/v1/posts/{post_id}")).await
    }

    /// Get a post's comment tree.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the post does not exist, or another
    /// error if the request fails.
    pub async fn get_thread(&self, post_id: &str) -> Result<Vec<ThreadEntry>, ClientError> {
        self.get(&format!("/v1/posts/{post_id}/thread")).await
    }

    /// Get the engine's current counters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn metrics(&self) -> Result<MetricsSnapshot, ClientError> {
        self.get("/v1/metrics").await
    }

    /// Check the service is up.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/health").await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("x-client-name", &self.client_name)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Try to parse error response
        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.error.code;
                let message = api_error.error.message;

                if code == "engine_stopped" || code == "engine_overloaded" {
                    Err(ClientError::EngineUnavailable(message))
                } else if status == StatusCode::NOT_FOUND {
                    Err(ClientError::NotFound { code, message })
                } else {
                    Err(ClientError::Api {
                        code,
                        message,
                        status: status.as_u16(),
                    })
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Name sent in the `x-client-name` header.
    pub client_name: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            client_name: "forum-client".to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with a client name.
    #[must_use]
    pub fn with_client_name(name: impl Into<String>) -> Self {
        Self {
            client_name: name.into(),
            ..Self::default()
        }
    }
}
