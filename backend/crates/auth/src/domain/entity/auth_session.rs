//! Auth Session Entity
//!
//! Server-side session state. The client only holds a signed reference to
//! `session_id`; everything else lives in the store.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{SessionId, UserId};

use crate::domain::value_object::{display_name::DisplayName, user_role::UserRole};

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub authenticated: bool,
    /// Name at authentication time
    pub name: DisplayName,
    /// Role at authentication time. Not refreshed when an admin changes the
    /// stored role.
    pub user_role: UserRole,
    /// Absolute expiry (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    /// Create an authenticated session expiring `ttl` from now.
    pub fn new(user_id: UserId, name: DisplayName, user_role: UserRole, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            authenticated: true,
            name,
            user_role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// Record activity. Expiry is absolute and is not moved.
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(ttl: Duration) -> AuthSession {
        AuthSession::new(
            UserId::new(),
            DisplayName::new("Ann").unwrap(),
            UserRole::User,
            ttl,
        )
    }

    #[test]
    fn test_new_session_is_authenticated_and_live() {
        let s = session(Duration::hours(1));
        assert!(s.authenticated);
        assert!(!s.is_expired());
        assert!(s.expires_at_ms - Utc::now().timestamp_millis() > 59 * 60 * 1000);
    }

    #[test]
    fn test_expiry_boundary() {
        let s = session(Duration::hours(1));
        assert!(!s.is_expired_at(s.expires_at_ms - 1));
        assert!(s.is_expired_at(s.expires_at_ms));
    }

    #[test]
    fn test_touch_does_not_extend() {
        let mut s = session(Duration::hours(1));
        let expires = s.expires_at_ms;
        s.touch();
        assert_eq!(s.expires_at_ms, expires);
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        assert!(session(Duration::seconds(-1)).is_expired());
    }
}
