//! Server-side session record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A server session tracked by cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    /// Subject of the authenticated user, if the session was opened with a token.
    pub subject: Option<String>,
}

impl Session {
    pub fn new(subject: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_at: now,
            last_seen_at: now,
            subject,
        }
    }

    /// Whether the session has been idle longer than `ttl` as of `now`.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_seen_at > ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_fresh() {
        let session = Session::new(None);
        assert_eq!(session.created_at, session.last_seen_at);
        assert!(!session.is_expired(Duration::seconds(60), Utc::now()));
    }

    #[test]
    fn test_session_expires_after_ttl() {
        let mut session = Session::new(Some("user".to_string()));
        session.last_seen_at = Utc::now() - Duration::seconds(120);
        assert!(session.is_expired(Duration::seconds(60), Utc::now()));
        assert!(!session.is_expired(Duration::seconds(600), Utc::now()));
    }
}
