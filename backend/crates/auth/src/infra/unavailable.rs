//! Repository whose every call fails as if the database were down.

use kernel::id::{SessionId, UserId};

use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Copy, Default)]
pub struct UnavailableAuthRepository;

fn down<T>() -> AuthResult<T> {
    Err(AuthError::Database(sqlx::Error::PoolTimedOut))
}

impl UserRepository for UnavailableAuthRepository {
    async fn create(&self, _user: &User) -> AuthResult<()> {
        down()
    }

    async fn find_by_id(&self, _user_id: &UserId) -> AuthResult<Option<User>> {
        down()
    }

    async fn find_by_email(&self, _email: &Email) -> AuthResult<Option<User>> {
        down()
    }

    async fn exists_by_email(&self, _email: &Email) -> AuthResult<bool> {
        down()
    }

    async fn update_role(&self, _user_id: &UserId, _role: UserRole) -> AuthResult<bool> {
        down()
    }

    async fn list_all(&self) -> AuthResult<Vec<User>> {
        down()
    }
}

impl AuthSessionRepository for UnavailableAuthRepository {
    async fn create(&self, _session: &AuthSession) -> AuthResult<()> {
        down()
    }

    async fn find_by_id(&self, _session_id: &SessionId) -> AuthResult<Option<AuthSession>> {
        down()
    }

    async fn update(&self, _session: &AuthSession) -> AuthResult<()> {
        down()
    }

    async fn delete(&self, _session_id: &SessionId) -> AuthResult<()> {
        down()
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        down()
    }
}
