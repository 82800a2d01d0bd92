//! Password Hashing and Verification
//!
//! - Argon2id hashing with a fresh random salt per hash
//! - Zeroization of clear text (and of the peppered copy)
//! - Optional application-wide pepper
//! - Async wrappers that run the memory-hard work on tokio's blocking pool

use std::fmt;
use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Minimum password length for new passwords
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Well-formed Argon2id hash, with the parameters `hash` uses, that no
/// password produces.
const DECOY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Empty,

    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// Unicode is normalized using NFKC on construction, so the same password
/// typed on different keyboards hashes identically.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("longenough1".to_string()).unwrap();
/// assert!(format!("{password:?}").contains("REDACTED"));
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a password for a new account, enforcing the minimum length.
    ///
    /// Lengths are counted in Unicode code points after normalization. There
    /// is no upper bound; Argon2 takes input of any practical size.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized = Self::normalize(raw);

        if normalized.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(normalized))
    }

    /// Create a password submitted for verification against a stored hash.
    ///
    /// Only emptiness is rejected: the length policy may have changed since
    /// the account was created, and a wrong password must fail at
    /// verification, not at parsing.
    pub fn for_verification(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized = Self::normalize(raw);
        if normalized.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(normalized))
    }

    fn normalize(mut raw: String) -> String {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        normalized
    }

    /// Password bytes with the pepper appended, wiped when dropped.
    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }

    /// Hash the password using Argon2id
    ///
    /// ## Arguments
    /// * `pepper` - Optional application-wide secret
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = self.peppered(pepper);

        // Generate random salt (128 bits = 16 bytes)
        let salt = SaltString::generate(OsRng);

        // OWASP recommended Argon2id parameters:
        // m=19456 (19 MiB), t=2, p=1
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries the algorithm, version, parameters, salt and hash,
/// so it is self-describing and safe to store as-is.
///
/// ```rust
/// use platform::password::{ClearTextPassword, HashedPassword};
///
/// let password = ClearTextPassword::new("longenough1".to_string()).unwrap();
/// let hashed = password.hash(None).unwrap();
/// assert!(hashed.verify(&password, None));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// A hash to verify against when there is no account, so the lookup
    /// miss costs the same Argon2 work as a real check.
    pub fn decoy() -> Self {
        Self {
            hash: DECOY_PHC.to_string(),
        }
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Argon2 compares the digests in constant time.
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let password_bytes = password.peppered(pepper);

        let Ok(parsed_hash) = PasswordHash::new(&self.hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(&password_bytes, &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Blocking-pool offload
// ============================================================================

/// Hash on tokio's blocking pool so request tasks keep running.
pub async fn hash_off_thread(
    password: ClearTextPassword,
    pepper: Option<Arc<[u8]>>,
) -> Result<HashedPassword, PasswordHashError> {
    tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
}

/// Verify on tokio's blocking pool. A panicked worker counts as a mismatch.
pub async fn verify_off_thread(
    hashed: HashedPassword,
    password: ClearTextPassword,
    pepper: Option<Arc<[u8]>>,
) -> bool {
    tokio::task::spawn_blocking(move || hashed.verify(&password, pepper.as_deref()))
        .await
        .unwrap_or(false)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert_eq!(
            result.unwrap_err(),
            PasswordPolicyError::TooShort { min: 8, actual: 5 }
        );
    }

    #[test]
    fn test_password_exactly_min_length() {
        assert!(ClearTextPassword::new("12345678".to_string()).is_ok());
    }

    #[test]
    fn test_long_password_is_accepted() {
        let password = ClearTextPassword::new("a".repeat(1024)).unwrap();
        let hashed = password.hash(None).unwrap();
        assert!(hashed.verify(&password, None));
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new("".to_string());
        assert_eq!(result.unwrap_err(), PasswordPolicyError::Empty);
    }

    #[test]
    fn test_length_counts_code_points() {
        // 8 code points, 24 bytes
        assert!(ClearTextPassword::new("パスワード安全だ".to_string()).is_ok());
        // 4 code points, 12 bytes
        assert!(ClearTextPassword::new("パスワー".to_string()).is_err());
    }

    #[test]
    fn test_for_verification_skips_length_policy() {
        assert!(ClearTextPassword::for_verification("short".to_string()).is_ok());
        assert_eq!(
            ClearTextPassword::for_verification(String::new()).unwrap_err(),
            PasswordPolicyError::Empty
        );
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(None).unwrap();

        assert_ne!(hashed.as_phc_string(), "TestPassword123!");
        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hashed.verify(&password, None));

        let wrong_password = ClearTextPassword::new("WrongPassword123!".to_string()).unwrap();
        assert!(!hashed.verify(&wrong_password, None));
    }

    #[test]
    fn test_decoy_is_well_formed_and_never_matches() {
        assert!(HashedPassword::from_phc_string(DECOY_PHC).is_ok());

        let password = ClearTextPassword::for_verification("anything".to_string()).unwrap();
        assert!(!HashedPassword::decoy().verify(&password, None));
        assert!(!HashedPassword::decoy().verify(&password, Some(b"pepper")));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let a = password.hash(None).unwrap();
        let b = password.hash(None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let pepper = b"my_secret_pepper";
        let hashed = password.hash(Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")));
    }

    #[test]
    fn test_nfkc_normalized_before_hashing() {
        // Fullwidth digits normalize to ASCII digits
        let ascii = ClearTextPassword::new("password1234".to_string()).unwrap();
        let fullwidth = ClearTextPassword::for_verification("password１２３４".to_string()).unwrap();
        let hashed = ascii.hash(None).unwrap();
        assert!(hashed.verify(&fullwidth, None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let password = ClearTextPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = password.hash(None).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_phc_string() {
        let result = HashedPassword::from_phc_string("not_a_valid_hash");
        assert!(matches!(result, Err(PasswordHashError::InvalidHashFormat)));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secret".to_string()).unwrap();
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }

    #[tokio::test]
    async fn test_off_thread_hash_and_verify() {
        let pepper: Option<Arc<[u8]>> = Some(Arc::from(&b"pepper"[..]));
        let password = ClearTextPassword::new("longenough1".to_string()).unwrap();
        let hashed = hash_off_thread(password, pepper.clone()).await.unwrap();

        let again = ClearTextPassword::for_verification("longenough1".to_string()).unwrap();
        assert!(verify_off_thread(hashed.clone(), again, pepper.clone()).await);

        let wrong = ClearTextPassword::for_verification("longenough2".to_string()).unwrap();
        assert!(!verify_off_thread(hashed, wrong, pepper).await);
    }
}
