use thiserror::Error;

/// Errors from bearer token extraction and verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("malformed authorization header")]
    MalformedHeader,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    Expired,

    #[error("no signing key matches kid '{0}'")]
    UnknownKey(String),

    #[error("key set unavailable: {0}")]
    KeySetUnavailable(String),
}

impl AuthError {
    /// Whether the failure is the caller's fault (401) rather than ours.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::KeySetUnavailable(_))
    }
}

/// Errors related to server session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to transcript persistence.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("storage error: {0}")]
    StorageError(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
