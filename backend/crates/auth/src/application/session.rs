//! Session Manager
//!
//! Issues, resolves and tears down server-side sessions bound to an opaque
//! signed cookie token. Every state change is awaited, so it is durable
//! before the response leaves.

use std::sync::Arc;

use kernel::id::{SessionId, UserId};

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::{
    display_name::DisplayName, session_token::SessionToken, user_role::UserRole,
};
use crate::error::AuthResult;

pub struct SessionManager<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SessionManager<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Persist a new authenticated session and return its token.
    pub async fn create(
        &self,
        user_id: UserId,
        name: DisplayName,
        role: UserRole,
    ) -> AuthResult<SessionToken> {
        let session = AuthSession::new(user_id, name, role, self.config.session_ttl_chrono());
        self.session_repo.create(&session).await?;

        tracing::debug!(
            session_id = %session.session_id,
            user_id = %user_id,
            expires_at_ms = session.expires_at_ms,
            "Session created"
        );

        Ok(SessionToken::issue(session.session_id, &self.config.session_secret))
    }

    /// Resolve a cookie token to a live session.
    ///
    /// Bad signatures and unknown ids resolve to `None`. Expired sessions are
    /// deleted on sight and also resolve to `None`.
    pub async fn resolve(&self, token: &str) -> AuthResult<Option<AuthSession>> {
        let Some(session_id) = SessionToken::verify(token, &self.config.session_secret) else {
            tracing::debug!("Session token failed verification");
            return Ok(None);
        };

        let Some(mut session) = self.session_repo.find_by_id(&session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.session_repo.delete(&session_id).await?;
            tracing::debug!(session_id = %session_id, "Expired session removed");
            return Ok(None);
        }

        session.touch();
        self.session_repo.update(&session).await?;

        Ok(Some(session))
    }

    /// Destroy the session behind a token. Unknown or malformed tokens are a
    /// no-op.
    pub async fn destroy(&self, token: &str) -> AuthResult<()> {
        let Some(session_id) = SessionToken::verify(token, &self.config.session_secret) else {
            return Ok(());
        };
        self.delete(&session_id).await
    }

    pub async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.session_repo.delete(session_id).await
    }

    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        self.session_repo.cleanup_expired().await
    }
}
