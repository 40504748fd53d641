//! Token verifier implementations.
//!
//! - [`shared_secret::SharedSecretVerifier`]: HS256 tokens issued by this
//!   deployment with a secret it also holds.
//! - [`jwks::JwksVerifier`]: RS256 tokens issued by a hosted identity
//!   provider, verified against its published key set.

pub mod jwks;
pub mod shared_secret;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};

use nova_types::error::AuthError;

/// Map a `jsonwebtoken` failure to a domain [`AuthError`].
pub(crate) fn map_jwt_error(err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::InvalidToken(err.to_string()),
    }
}
