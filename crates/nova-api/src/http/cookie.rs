//! Session cookie formatting and parsing.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use uuid::Uuid;

/// `Set-Cookie` value that opens a session.
pub fn session_cookie(name: &str, id: &Uuid) -> String {
    format!("{name}={id}; HttpOnly; Path=/; SameSite=Lax")
}

/// `Set-Cookie` value that removes the session cookie from the browser.
pub fn cleared_cookie(name: &str) -> String {
    format!("{name}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

/// Find the value of cookie `name` across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
}
