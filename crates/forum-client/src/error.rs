//! Client error types.

/// Errors that can occur when using the forum client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The requested entity, or one a command referenced, does not exist.
    #[error("not found ({code}): {message}")]
    NotFound {
        /// Error code, such as `post_not_found`.
        code: String,
        /// Error message.
        message: String,
    },

    /// The remote engine is stopped or its mailbox is full.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(err) => err.is_timeout() || err.is_connect(),
            Self::EngineUnavailable(_) => true,
            Self::Api { status, .. } => *status >= 500,
            Self::NotFound { .. } | Self::Serialization(_) | Self::Configuration(_) => false,
        }
    }
}
