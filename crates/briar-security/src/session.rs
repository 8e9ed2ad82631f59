//! Server-side session store.
//!
//! Sessions live in process memory, keyed by a random session ID that the
//! REST layer transports in an HttpOnly cookie. Expiry is sliding: each
//! successful lookup extends the session by the configured TTL.

use briar_core::{UserId, UserRole};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

/// Concurrent session store with TTL expiry.
///
/// Expired entries are dropped lazily on lookup and can be swept in bulk
/// with [`purge_expired`](Self::purge_expired).
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<String, Session>>,
    ttl: ChronoDuration,
}

impl SessionStore {
    /// Creates a store with the given session TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl: ChronoDuration::from_std(ttl).unwrap_or_else(|_| ChronoDuration::hours(24)),
        }
    }

    /// Creates a new session for the user and returns its ID.
    pub fn create(&self, user_id: UserId, username: String, role: UserRole) -> String {
        let session_id = Uuid::new_v4().simple().to_string();
        let session = Session {
            user_id,
            username,
            role,
            expires_at: Utc::now() + self.ttl,
        };

        self.inner.insert(session_id.clone(), session);
        debug!("Session created for user {}", user_id);
        session_id
    }

    /// Looks up a session, refreshing its expiry on hit.
    ///
    /// Returns `None` for unknown or expired IDs; expired entries are
    /// removed as a side effect.
    pub fn get(&self, session_id: &str) -> Option<Session> {
        let now = Utc::now();

        let expired = match self.inner.get_mut(session_id) {
            Some(mut entry) => {
                if entry.expires_at > now {
                    entry.expires_at = now + self.ttl;
                    return Some(entry.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            self.inner.remove(session_id);
        }
        None
    }

    /// Removes a session (logout). Unknown IDs are a no-op.
    pub fn remove(&self, session_id: &str) {
        self.inner.remove(session_id);
    }

    /// Drops every expired session and returns the number removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.inner.len();
        self.inner.retain(|_, session| session.expires_at > now);
        before - self.inner.len()
    }

    /// Number of live entries (including not-yet-purged expired ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(ttl_secs: u64) -> SessionStore {
        SessionStore::new(Duration::from_secs(ttl_secs))
    }

    #[test]
    fn test_create_and_get() {
        let store = store(60);
        let sid = store.create(UserId::new(), "admin".into(), UserRole::Admin);

        let session = store.get(&sid).expect("session should exist");
        assert_eq!(session.username, "admin");
        assert_eq!(session.role, UserRole::Admin);
    }

    #[test]
    fn test_unknown_session_is_none() {
        let store = store(60);
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_remove() {
        let store = store(60);
        let sid = store.create(UserId::new(), "admin".into(), UserRole::Editor);
        store.remove(&sid);
        assert!(store.get(&sid).is_none());
    }

    #[test]
    fn test_expired_session_is_dropped() {
        let store = store(0);
        let sid = store.create(UserId::new(), "admin".into(), UserRole::Editor);
        assert!(store.get(&sid).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let store = store(0);
        store.create(UserId::new(), "a".into(), UserRole::Editor);
        store.create(UserId::new(), "b".into(), UserRole::Editor);
        assert_eq!(store.purge_expired(), 2);
        assert!(store.is_empty());
    }
}
