//! In-memory session store.
//!
//! Sessions live only as long as the process; a restart logs everyone out.

use chrono::{Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use nova_core::session::SessionStore;
use nova_types::error::SessionError;
use nova_types::session::Session;

/// Session store backed by a concurrent hash map.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<Uuid, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    async fn create(&self, subject: Option<String>) -> Result<Session, SessionError> {
        let session = Session::new(subject);
        self.sessions.insert(session.id, session.clone());
        tracing::debug!(session_id = %session.id, "session created");
        Ok(session)
    }

    async fn touch(&self, id: &Uuid, ttl: Duration) -> Result<Option<Session>, SessionError> {
        let now = Utc::now();
        if self
            .sessions
            .remove_if(id, |_, s| s.is_expired(ttl, now))
            .is_some()
        {
            tracing::debug!(session_id = %id, "session expired");
            return Ok(None);
        }

        Ok(self.sessions.get_mut(id).map(|mut entry| {
            entry.last_seen_at = now;
            entry.value().clone()
        }))
    }

    async fn destroy(&self, id: &Uuid) -> Result<bool, SessionError> {
        let existed = self.sessions.remove(id).is_some();
        tracing::debug!(session_id = %id, existed, "session destroyed");
        Ok(existed)
    }

    async fn purge_expired(&self, ttl: Duration) -> Result<usize, SessionError> {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired(ttl, now));
        Ok(before.saturating_sub(self.sessions.len()))
    }
}
