use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated admin-panel session.
///
/// The token only travels in the session cookie; it is never part of a
/// serialized response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    #[serde(skip_serializing, default)]
    pub token: String,
    pub username: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session() -> AdminSession {
        let now = Utc::now();
        AdminSession {
            token: "secret-token".to_string(),
            username: "admin".to_string(),
            issued_at: now,
            expires_at: now + Duration::minutes(30),
        }
    }

    #[test]
    fn test_token_is_not_serialized() {
        let json = serde_json::to_value(session()).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["username"], "admin");
    }

    #[test]
    fn test_expiry() {
        let session = session();
        assert!(!session.is_expired_at(session.issued_at));
        assert!(session.is_expired_at(session.expires_at));
        assert!(session.is_expired_at(session.expires_at + Duration::seconds(1)));
    }
}
