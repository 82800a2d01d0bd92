//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use kernel::id::{SessionId, UserId};

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user. A duplicate email fails with `EmailTaken`.
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Set the stored role. Returns `false` when no such user exists.
    async fn update_role(&self, user_id: &UserId, role: UserRole) -> AuthResult<bool>;

    /// All users, oldest first
    async fn list_all(&self) -> AuthResult<Vec<User>>;
}

/// Session store
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find a session by ID, expired or not. Expiry is the caller's call.
    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<AuthSession>>;

    /// Persist last activity
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session. Deleting a missing session is not an error.
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Delete every expired session, returning how many were removed.
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
