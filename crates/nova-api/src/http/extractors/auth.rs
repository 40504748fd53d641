//! Bearer token authentication extractor.
//!
//! With auth mode `none` the state carries no verifier and every request
//! passes anonymously, token or not. Otherwise `Authorization: Bearer <jwt>`
//! is required and verified.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use nova_core::auth::bearer::parse_bearer;
use nova_types::auth::Identity;
use nova_types::error::AuthError;

use crate::http::error::AppError;
use crate::state::AppState;

/// The caller's identity, or `None` when authentication is disabled.
pub struct MaybeIdentity(pub Option<Identity>);

impl FromRequestParts<AppState> for MaybeIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(verifier) = &state.verifier else {
            return Ok(MaybeIdentity(None));
        };

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?;
        let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
        let token = parse_bearer(value)?;

        let claims = verifier.verify(token).await?;
        tracing::debug!(sub = %claims.sub, scheme = verifier.scheme(), "token verified");
        Ok(MaybeIdentity(Some(Identity::from(claims))))
    }
}
