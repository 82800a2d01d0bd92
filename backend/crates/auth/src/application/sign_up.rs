//! Sign Up Use Case
//!
//! Creates a new member account and logs it in.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::session::SessionManager;
use crate::application::validation::{Validate, ValidSignUp, field};
use crate::domain::entity::user::User;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName, email::Email, session_token::SessionToken,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input, as submitted
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for SignUpInput {
    type Valid = ValidSignUp;

    fn validate(self) -> AuthResult<ValidSignUp> {
        let name = field(DisplayName::new(&self.name))?;
        let email = field(Email::new(self.email))?;
        let password = field(RawPassword::new(self.password))?;
        Ok(ValidSignUp {
            name,
            email,
            password,
        })
    }
}

pub struct SignUpOutput {
    pub user_id: UserId,
    pub session_token: SessionToken,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    sessions: SessionManager<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let ValidSignUp {
            name,
            email,
            password,
        } = input.validate()?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::hash(password, self.config.pepper())
            .await
            .map_err(|e| AuthError::Hashing(e.message().to_string()))?;

        let user = User::new(name, email, password_hash);

        // The unique index still catches a concurrent signup that passed the
        // existence check.
        self.user_repo.create(&user).await?;

        let session_token = self
            .sessions
            .create(user.user_id, user.name.clone(), user.user_role)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            session_token,
        })
    }
}
