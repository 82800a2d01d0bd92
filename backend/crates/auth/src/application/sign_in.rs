//! Sign In Use Case
//!
//! Authenticates a member by email and password and creates a session.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::application::validation::{Validate, ValidLogIn, field};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    session_token::SessionToken,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input, as submitted
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

impl Validate for SignInInput {
    type Valid = ValidLogIn;

    fn validate(self) -> AuthResult<ValidLogIn> {
        let email = field(Email::new(self.email))?;
        let password = field(RawPassword::for_verification(self.password))?;
        Ok(ValidLogIn { email, password })
    }
}

pub struct SignInOutput {
    pub user_id: UserId,
    pub session_token: SessionToken,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    sessions: SessionManager<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            sessions: SessionManager::new(session_repo, config.clone()),
            config,
        }
    }

    /// Unknown email and wrong password both fail with
    /// [`AuthError::InvalidCredentials`].
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let ValidLogIn { email, password } = input.validate()?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            // Same hashing cost as a wrong password
            UserPassword::decoy()
                .verify(password, self.config.pepper())
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        if !user
            .password_hash
            .verify(password, self.config.pepper())
            .await
        {
            return Err(AuthError::InvalidCredentials);
        }

        let session_token = self
            .sessions
            .create(user.user_id, user.name.clone(), user.user_role)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_role = %user.user_role,
            "User signed in"
        );

        Ok(SignInOutput {
            user_id: user.user_id,
            session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_up::{SignUpInput, SignUpUseCase};
    use crate::infra::memory::InMemoryAuthRepository;

    fn sign_in(
        repo: &InMemoryAuthRepository,
        config: &Arc<AuthConfig>,
    ) -> SignInUseCase<InMemoryAuthRepository, InMemoryAuthRepository> {
        SignInUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()), config.clone())
    }

    fn input(email: &str, password: &str) -> SignInInput {
        SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_fail_alike() {
        let repo = InMemoryAuthRepository::new();
        let config = Arc::new(AuthConfig::development());
        SignUpUseCase::new(Arc::new(repo.clone()), Arc::new(repo.clone()), config.clone())
            .execute(SignUpInput {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                password: "longenough1".to_string(),
            })
            .await
            .unwrap();
        let use_case = sign_in(&repo, &config);

        let unknown = use_case.execute(input("bob@example.com", "longenough1")).await;
        assert!(matches!(unknown, Err(AuthError::InvalidCredentials)));

        let wrong = use_case.execute(input("ann@example.com", "longenough2")).await;
        assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

        let ok = use_case.execute(input("ANN@example.com", "longenough1")).await.unwrap();
        assert_eq!(repo.session_count().await, 2);
        assert!(!ok.session_token.as_str().is_empty());
    }
}
