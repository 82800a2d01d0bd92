//! Access Control
//!
//! Pure authorization decisions over an explicit per-request access state.
//! The HTTP layer resolves the state once and maps each [`Decision`] to a
//! response.

use kernel::id::UserId;

use crate::domain::entity::auth_session::AuthSession;
use crate::domain::value_object::{display_name::DisplayName, user_role::UserRole};

/// Who the session says the caller is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: UserId,
    pub name: DisplayName,
}

/// Authorization state of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
    AuthenticatedAdmin(SessionUser),
}

/// What a route demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Member,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Not logged in
    RedirectToLanding,
    /// Logged in, but the role is insufficient
    Forbidden,
}

impl Access {
    /// Derive the access state from a resolved session, using the role cached
    /// in the session.
    pub fn from_session(session: &AuthSession) -> Self {
        if !session.authenticated {
            return Access::Anonymous;
        }

        let user = SessionUser {
            user_id: session.user_id,
            name: session.name.clone(),
        };

        match session.user_role {
            UserRole::Admin => Access::AuthenticatedAdmin(user),
            UserRole::User => Access::Authenticated(user),
        }
    }

    pub fn decide(&self, requirement: Requirement) -> Decision {
        match (self, requirement) {
            (Access::Anonymous, _) => Decision::RedirectToLanding,
            (Access::Authenticated(_), Requirement::Admin) => Decision::Forbidden,
            (Access::Authenticated(_), Requirement::Member)
            | (Access::AuthenticatedAdmin(_), _) => Decision::Allow,
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Access::Anonymous => None,
            Access::Authenticated(user) | Access::AuthenticatedAdmin(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Role as seen by the views; `None` when anonymous.
    pub fn role(&self) -> Option<UserRole> {
        match self {
            Access::Anonymous => None,
            Access::Authenticated(_) => Some(UserRole::User),
            Access::AuthenticatedAdmin(_) => Some(UserRole::Admin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> SessionUser {
        SessionUser {
            user_id: UserId::new(),
            name: DisplayName::new("Ann").unwrap(),
        }
    }

    #[test]
    fn test_anonymous_is_redirected_everywhere() {
        assert_eq!(
            Access::Anonymous.decide(Requirement::Member),
            Decision::RedirectToLanding
        );
        assert_eq!(
            Access::Anonymous.decide(Requirement::Admin),
            Decision::RedirectToLanding
        );
    }

    #[test]
    fn test_member_is_forbidden_from_admin_routes() {
        let access = Access::Authenticated(user());
        assert_eq!(access.decide(Requirement::Member), Decision::Allow);
        assert_eq!(access.decide(Requirement::Admin), Decision::Forbidden);
    }

    #[test]
    fn test_admin_is_allowed_everywhere() {
        let access = Access::AuthenticatedAdmin(user());
        assert_eq!(access.decide(Requirement::Member), Decision::Allow);
        assert_eq!(access.decide(Requirement::Admin), Decision::Allow);
    }

    #[test]
    fn test_from_session_uses_cached_role() {
        let name = DisplayName::new("Bob").unwrap();
        let mut session = AuthSession::new(UserId::new(), name, UserRole::Admin, Duration::hours(1));
        assert!(matches!(
            Access::from_session(&session),
            Access::AuthenticatedAdmin(_)
        ));

        session.user_role = UserRole::User;
        assert!(matches!(Access::from_session(&session), Access::Authenticated(_)));

        session.authenticated = false;
        assert_eq!(Access::from_session(&session), Access::Anonymous);
    }

    #[test]
    fn test_role_and_user_accessors() {
        assert_eq!(Access::Anonymous.role(), None);
        assert!(!Access::Anonymous.is_authenticated());
        let admin = Access::AuthenticatedAdmin(user());
        assert_eq!(admin.role(), Some(UserRole::Admin));
        assert_eq!(admin.user().map(|u| u.name.as_str()), Some("Ann"));
    }
}
