//! API error types and responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use forum_core::EngineError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Resource not found on a read endpoint.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - the body is not a valid command.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The engine rejected a synchronously delivered command.
    #[error(transparent)]
    Rejected(#[from] EngineError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Rejected(err) => (
                rejection_status(err),
                err.code(),
                err.to_string(),
                rejection_details(err),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

fn rejection_status(err: &EngineError) -> StatusCode {
    match err {
        EngineError::MissingField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::Unhandled { .. } => StatusCode::NOT_IMPLEMENTED,
        EngineError::Overloaded { capacity } => {
            tracing::warn!(capacity, "Engine mailbox is full");
            StatusCode::SERVICE_UNAVAILABLE
        }
        EngineError::EngineStopped => {
            tracing::error!("Engine mailbox is closed");
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ if err.is_not_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn rejection_details(err: &EngineError) -> Option<serde_json::Value> {
    match err {
        EngineError::MissingField { field } => Some(serde_json::json!({ "field": field })),
        EngineError::ParentNotFound {
            comment_id,
            parent_id,
            post_id,
        } => Some(serde_json::json!({
            "comment_id": comment_id,
            "parent_id": parent_id,
            "post_id": post_id
        })),
        EngineError::Unhandled { kind } => Some(serde_json::json!({ "command": kind })),
        EngineError::Overloaded { capacity } => Some(serde_json::json!({ "capacity": capacity })),
        _ => None,
    }
}
