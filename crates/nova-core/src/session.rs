//! Server session store port.

use std::future::Future;

use chrono::Duration;
use uuid::Uuid;

use nova_types::error::SessionError;
use nova_types::session::Session;

/// Storage backend for cookie-tracked server sessions.
pub trait SessionStore: Send + Sync {
    /// Open a new session, optionally bound to an authenticated subject.
    fn create(
        &self,
        subject: Option<String>,
    ) -> impl Future<Output = Result<Session, SessionError>> + Send;

    /// Look up a live session and refresh its idle timer.
    ///
    /// Returns `None` if the session does not exist or has been idle longer
    /// than `ttl` (an expired session is removed as a side effect).
    fn touch(
        &self,
        id: &Uuid,
        ttl: Duration,
    ) -> impl Future<Output = Result<Option<Session>, SessionError>> + Send;

    /// Destroy a session. Returns whether it existed.
    fn destroy(&self, id: &Uuid) -> impl Future<Output = Result<bool, SessionError>> + Send;

    /// Remove every session idle longer than `ttl`. Returns how many were removed.
    fn purge_expired(
        &self,
        ttl: Duration,
    ) -> impl Future<Output = Result<usize, SessionError>> + Send;
}
