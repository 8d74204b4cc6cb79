//! API handlers.

pub mod commands;
pub mod health;
pub mod messages;
pub mod metrics;
pub mod posts;
pub mod subreddits;
pub mod users;

use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use forum_core::{Ack, Command, CommandKind};

use crate::error::ApiError;
use crate::state::AppState;

/// JSON request body whose rejections use the API error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query parameters shared by every mutating endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DeliveryQuery {
    /// Wait for the engine and return the created entity.
    #[serde(default)]
    pub sync: bool,
}

/// Generic acknowledgement for fire-and-forget delivery.
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    /// Always `"accepted"`.
    pub status: &'static str,
    /// The kind of command that was queued.
    pub command: CommandKind,
}

/// Outcome of delivering one command.
#[derive(Debug)]
pub enum Delivery {
    /// Queued without waiting; the eventual outcome is only logged.
    Accepted(CommandKind),
    /// Applied; carries what the command created or mutated.
    Applied(Ack),
}

impl IntoResponse for Delivery {
    fn into_response(self) -> Response {
        match self {
            Self::Accepted(command) => (
                StatusCode::ACCEPTED,
                Json(AcceptedResponse {
                    status: "accepted",
                    command,
                }),
            )
                .into_response(),
            Self::Applied(ack) => (StatusCode::OK, Json(ack)).into_response(),
        }
    }
}

/// Hand a command to the engine, waiting for it only when asked to.
pub(crate) async fn deliver(
    state: &AppState,
    command: Command,
    query: &DeliveryQuery,
) -> Result<Delivery, ApiError> {
    let kind = command.kind();
    if query.sync {
        let ack = state.engine.ask(command).await?;
        Ok(Delivery::Applied(ack))
    } else {
        state.engine.tell(command)?;
        tracing::debug!(command = %kind, "Command queued");
        Ok(Delivery::Accepted(kind))
    }
}
