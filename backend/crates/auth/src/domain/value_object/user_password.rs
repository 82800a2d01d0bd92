//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Hashing and verification run on
//! the blocking pool, so both are `async` here.
//!
//! ```rust,no_run
//! # async fn demo() -> kernel::error::app_error::AppResult<()> {
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//!
//! let raw = RawPassword::new("longenough1".to_string())?;
//! let hashed = UserPassword::hash(raw, None).await?;
//!
//! let attempt = RawPassword::for_verification("longenough1".to_string())?;
//! assert!(hashed.verify(attempt, None).await);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    self, ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from a form. Memory is zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Password for a new account: required, at least 8 characters.
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(policy_error)
    }

    /// Password typed at login: only required.
    pub fn for_verification(raw: String) -> AppResult<Self> {
        ClearTextPassword::for_verification(raw)
            .map(Self)
            .map_err(policy_error)
    }
}

fn policy_error(e: PasswordPolicyError) -> AppError {
    AppError::bad_request(e.to_string())
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id PHC string. Safe to store; never rendered.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a raw password with a fresh salt.
    pub async fn hash(raw: RawPassword, pepper: Option<Arc<[u8]>>) -> AppResult<Self> {
        password::hash_off_thread(raw.0, pepper)
            .await
            .map(Self)
            .map_err(|e| match e {
                PasswordHashError::HashingFailed(msg) => {
                    AppError::internal(format!("Password hashing failed: {}", msg))
                }
                PasswordHashError::InvalidHashFormat => {
                    AppError::internal("Unexpected error during password hashing")
                }
            })
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| AppError::internal("Invalid password hash in database").with_source(e))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Stand-in hash for a login against an unknown email. Never verifies.
    pub fn decoy() -> Self {
        Self(HashedPassword::decoy())
    }

    /// Verify a raw password against this hash
    pub async fn verify(&self, raw: RawPassword, pepper: Option<Arc<[u8]>>) -> bool {
        password::verify_off_thread(self.0.clone(), raw.0, pepper).await
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("longenough1".to_string()).is_ok());

        let short = RawPassword::new("short".to_string()).unwrap_err();
        assert_eq!(short.message(), "Password must be at least 8 characters long");

        let empty = RawPassword::new(String::new()).unwrap_err();
        assert_eq!(empty.message(), "Password is required");
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let raw = RawPassword::new("longenough1".to_string()).unwrap();
        let hashed = UserPassword::hash(raw, None).await.unwrap();
        assert_ne!(hashed.as_phc_string(), "longenough1");

        let good = RawPassword::for_verification("longenough1".to_string()).unwrap();
        assert!(hashed.verify(good, None).await);

        let bad = RawPassword::for_verification("longenough2".to_string()).unwrap();
        assert!(!hashed.verify(bad, None).await);
    }

    #[tokio::test]
    async fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("longenough1".to_string()).unwrap();
        let hashed = UserPassword::hash(raw, None).await.unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        let again = RawPassword::for_verification("longenough1".to_string()).unwrap();
        assert!(restored.verify(again, None).await);
    }

    #[tokio::test]
    async fn test_decoy_never_verifies() {
        let raw = RawPassword::for_verification("longenough1".to_string()).unwrap();
        assert!(!UserPassword::decoy().verify(raw, None).await);
    }

    #[test]
    fn test_corrupt_hash_is_internal_error() {
        let err = UserPassword::from_phc_string("plaintext").unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{:?}", raw);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));
    }
}
