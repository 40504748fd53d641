//! Session cookie extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::http::cookie::read_cookie;
use crate::state::AppState;

/// Session id from the request's session cookie, if present and well-formed.
///
/// Says nothing about whether the session is still alive; handlers check that
/// against the store.
pub struct SessionCookie(pub Option<Uuid>);

impl FromRequestParts<AppState> for SessionCookie {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = read_cookie(&parts.headers, &state.config.session.cookie_name)
            .and_then(|value| Uuid::parse_str(value).ok());
        Ok(SessionCookie(id))
    }
}
