//! `POST /logout`: end the caller's session.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;

use nova_core::session::SessionStore;
use nova_types::chat::LogoutResponse;

use crate::http::cookie::cleared_cookie;
use crate::http::extractors::session::SessionCookie;
use crate::state::AppState;

/// Destroy the session named by the cookie and clear the cookie.
///
/// Always answers `{success: true}`; a missing or unknown session is not an
/// error.
pub async fn logout(
    State(state): State<AppState>,
    SessionCookie(session_id): SessionCookie,
) -> Response {
    if let Some(id) = session_id {
        match state.sessions.destroy(&id).await {
            Ok(existed) => tracing::debug!(session_id = %id, existed, "session destroyed"),
            Err(e) => tracing::warn!(session_id = %id, error = %e, "failed to destroy session"),
        }
    }

    let mut response = Json(LogoutResponse { success: true }).into_response();
    match HeaderValue::from_str(&cleared_cookie(&state.config.session.cookie_name)) {
        Ok(value) => {
            response.headers_mut().insert(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "invalid session cookie name"),
    }
    response
}
