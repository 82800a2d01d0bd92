//! Input Validation
//!
//! Raw form input is checked field by field in declaration order, and the
//! first violation is reported. Nothing here touches a store or the hasher.

use kernel::error::app_error::AppResult;

use crate::domain::value_object::{
    display_name::DisplayName, email::Email, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// A raw payload that can be turned into its typed, trimmed form.
pub trait Validate {
    type Valid;

    /// Fails with [`AuthError::Validation`] carrying the first violation.
    fn validate(self) -> AuthResult<Self::Valid>;
}

/// Signup fields that passed validation
#[derive(Debug)]
pub struct ValidSignUp {
    pub name: DisplayName,
    pub email: Email,
    pub password: RawPassword,
}

/// Login fields that passed validation
#[derive(Debug)]
pub struct ValidLogIn {
    pub email: Email,
    pub password: RawPassword,
}

pub(crate) fn field<T>(result: AppResult<T>) -> AuthResult<T> {
    result.map_err(|e| AuthError::Validation(e.message().to_string()))
}
