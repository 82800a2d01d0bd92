//! Check Session Use Case
//!
//! Resolves a cookie token and enforces that an authenticated session
//! always refers to an existing user.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

pub struct CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    sessions: SessionManager<S>,
}

impl<U, S> CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions: SessionManager::new(session_repo, config),
        }
    }

    /// ## Errors
    /// - `SessionInvalid`: bad signature, unknown, or expired session
    /// - `UserNotFound`: the session's user is gone; the session was deleted
    pub async fn execute(&self, session_token: &str) -> AuthResult<AuthSession> {
        let session = self
            .sessions
            .resolve(session_token)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if self.user_repo.find_by_id(&session.user_id).await?.is_none() {
            self.sessions.delete(&session.session_id).await?;
            tracing::info!(
                session_id = %session.session_id,
                user_id = %session.user_id,
                "Session referenced a missing user and was invalidated"
            );
            return Err(AuthError::UserNotFound);
        }

        Ok(session)
    }
}
