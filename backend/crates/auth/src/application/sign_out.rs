//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    sessions: SessionManager<S>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            sessions: SessionManager::new(session_repo, config),
        }
    }

    /// Sign out from the current session. Idempotent.
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        self.sessions.destroy(session_token).await?;
        tracing::info!("User signed out");
        Ok(())
    }
}
