use std::collections::HashMap;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use rand::Rng;
use tokio::sync::RwLock;

use crate::auth::models::AdminSession;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "spolder_session";

const TOKEN_BYTES: usize = 32;

/// In-process admin sessions keyed by token.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, AdminSession>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session for `username` with a fresh random token.
    pub async fn issue(&self, username: &str) -> AdminSession {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill(&mut bytes);
        let token = URL_SAFE_NO_PAD.encode(bytes);

        let now = Utc::now();
        let session = AdminSession {
            token: token.clone(),
            username: username.to_string(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions.write().await.insert(token, session.clone());
        session
    }

    /// Look up a live session. Expired sessions are dropped.
    pub async fn validate(&self, token: &str) -> Option<AdminSession> {
        let session = self.sessions.read().await.get(token).cloned()?;
        if session.is_expired_at(Utc::now()) {
            self.sessions.write().await.remove(token);
            tracing::debug!(username = %session.username, "Admin session expired");
            return None;
        }
        Some(session)
    }

    /// End a session. Returns `false` if the token was unknown.
    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_and_validate() {
        let store = SessionStore::new(Duration::minutes(30));
        let session = store.issue("admin").await;

        assert_eq!(session.token.len(), 43);
        let found = store.validate(&session.token).await.unwrap();
        assert_eq!(found.username, "admin");
        assert!(store.validate("forged").await.is_none());
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = SessionStore::new(Duration::minutes(30));
        let a = store.issue("admin").await;
        let b = store.issue("admin").await;
        assert_ne!(a.token, b.token);
    }

    #[tokio::test]
    async fn test_revoke() {
        let store = SessionStore::new(Duration::minutes(30));
        let session = store.issue("admin").await;

        assert!(store.revoke(&session.token).await);
        assert!(!store.revoke(&session.token).await);
        assert!(store.validate(&session.token).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_removed() {
        let store = SessionStore::new(Duration::zero());
        let session = store.issue("admin").await;

        assert!(store.validate(&session.token).await.is_none());
        assert!(!store.revoke(&session.token).await);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = SessionStore::new(Duration::zero());
        store.issue("admin").await;
        store.issue("admin").await;
        assert_eq!(store.purge_expired().await, 2);
    }
}
