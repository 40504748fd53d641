//! `POST /bot`: relay one chat message to the LLM.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use nova_core::session::SessionStore;
use nova_types::auth::Identity;
use nova_types::chat::{BotReply, BotRequest};

use crate::http::cookie::session_cookie;
use crate::http::error::AppError;
use crate::http::extractors::auth::MaybeIdentity;
use crate::http::extractors::session::SessionCookie;
use crate::state::AppState;

/// Relay the message and answer `{reply}`.
///
/// After a successful relay, opens a session (and sets its cookie) when
/// sessions are enabled and the request carries no live one.
pub async fn send_message(
    State(state): State<AppState>,
    MaybeIdentity(identity): MaybeIdentity,
    SessionCookie(session_id): SessionCookie,
    payload: Result<Json<BotRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let reply = state.relay.relay(&request.message).await?;

    // Sessions are opened only for successful exchanges.
    let new_cookie = ensure_session(&state, session_id, identity.as_ref()).await?;

    let mut response = Json(BotReply { reply }).into_response();
    if let Some(cookie) = new_cookie {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    Ok(response)
}

/// Refresh the caller's session, or open one. Returns the `Set-Cookie` value
/// when a new session was created.
async fn ensure_session(
    state: &AppState,
    session_id: Option<Uuid>,
    identity: Option<&Identity>,
) -> Result<Option<HeaderValue>, AppError> {
    if !state.config.session.enabled {
        return Ok(None);
    }

    if let Some(id) = session_id {
        if state.sessions.touch(&id, state.session_ttl()).await?.is_some() {
            return Ok(None);
        }
    }

    let session = state
        .sessions
        .create(identity.map(|i| i.subject.clone()))
        .await?;
    tracing::debug!(session_id = %session.id, "session opened");

    let cookie = session_cookie(&state.config.session.cookie_name, &session.id);
    HeaderValue::from_str(&cookie)
        .map(Some)
        .map_err(|e| AppError::Internal(format!("invalid session cookie: {e}")))
}
