//! Form payloads
//!
//! Every field defaults to empty so that a missing field is reported by the
//! validator with its own message instead of a generic form rejection.
//! No `Debug` impls: these carry clear-text passwords.

use serde::Deserialize;

use crate::application::{SignInInput, SignUpInput};

/// POST /signup
#[derive(Clone, Default, Deserialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<SignUpForm> for SignUpInput {
    fn from(form: SignUpForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: form.password,
        }
    }
}

/// POST /login
#[derive(Clone, Default, Deserialize)]
pub struct LogInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<LogInForm> for SignInInput {
    fn from(form: LogInForm) -> Self {
        Self {
            email: form.email,
            password: form.password,
        }
    }
}
