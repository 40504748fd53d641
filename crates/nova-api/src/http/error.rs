//! Application error type mapping to HTTP status codes.
//!
//! Auth failures answer with `{"error": "<reason>"}`. Everything else uses the
//! `{reply}` shape the chat client already renders, so a failure shows up as
//! a bot message. Internal details are logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use nova_core::relay::RelayError;
use nova_types::chat::BotReply;
use nova_types::error::{AuthError, SessionError};

/// Reply sent for an empty or unreadable message.
pub const EMPTY_MESSAGE_REPLY: &str = "Please enter a message.";

/// Reply sent for any server-side failure.
pub const FAILURE_REPLY: &str = "Sorry, I couldn’t process that right now.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Token extraction or verification failed.
    Auth(AuthError),
    /// The relay pipeline failed.
    Relay(RelayError),
    /// Session store failure.
    Session(SessionError),
    /// Request body could not be read.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Auth(e) if e.is_client_error() => {
                tracing::debug!(error = %e, "rejected request");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
            AppError::Relay(RelayError::EmptyMessage) => {
                reply(StatusCode::BAD_REQUEST, EMPTY_MESSAGE_REPLY)
            }
            AppError::Validation(msg) => {
                tracing::debug!(reason = %msg, "unreadable request body");
                reply(StatusCode::BAD_REQUEST, EMPTY_MESSAGE_REPLY)
            }
            AppError::Auth(e) => {
                tracing::error!(error = %e, "token verification unavailable");
                reply(StatusCode::INTERNAL_SERVER_ERROR, FAILURE_REPLY)
            }
            AppError::Relay(e) => {
                tracing::error!(error = %e, "relay failed");
                reply(StatusCode::INTERNAL_SERVER_ERROR, FAILURE_REPLY)
            }
            AppError::Session(e) => {
                tracing::error!(error = %e, "session store failed");
                reply(StatusCode::INTERNAL_SERVER_ERROR, FAILURE_REPLY)
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                reply(StatusCode::INTERNAL_SERVER_ERROR, FAILURE_REPLY)
            }
        }
    }
}

fn reply(status: StatusCode, text: &str) -> Response {
    (
        status,
        Json(BotReply {
            reply: text.to_string(),
        }),
    )
        .into_response()
}
