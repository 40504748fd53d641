//! `Authorization` header parsing.

use nova_types::error::AuthError;

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Any other scheme, or an empty
/// token, is a malformed header.
pub fn parse_bearer(header_value: &str) -> Result<&str, AuthError> {
    let header_value = header_value.trim();
    let (scheme, token) = header_value
        .split_once(char::is_whitespace)
        .ok_or(AuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token)
}
