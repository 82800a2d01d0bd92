//! Admin Use Cases
//!
//! Listing members and promoting/demoting them. Callers must already have
//! passed the admin gate.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_all().await
    }
}

pub struct ChangeRoleUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ChangeRoleUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Set the stored role of the user with the given id, as taken from the
    /// URL.
    ///
    /// Live sessions of the target keep the role they were created with.
    /// There is no guard against an admin demoting themselves.
    pub async fn execute(&self, target: &str, role: UserRole) -> AuthResult<()> {
        let user_id = UserId::parse(target).ok_or(AuthError::UserNotFound)?;

        if !self.user_repo.update_role(&user_id, role).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(
            target_user_id = %user_id,
            user_role = %role,
            "User role changed"
        );

        Ok(())
    }
}
