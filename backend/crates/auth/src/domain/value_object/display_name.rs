//! Display Name Value Object
//!
//! The name shown on the landing, members and admin pages. It is not an
//! identifier: two members may share a name.

use derive_more::Display;
use kernel::error::app_error::{AppError, AppResult};
use unicode_normalization::UnicodeNormalization;

pub const DISPLAY_NAME_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct DisplayName(String);

impl DisplayName {
    /// NFKC-normalize, trim, then check the length in code points.
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Name is required"));
        }

        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed() {
        assert_eq!(DisplayName::new("  Ann  ").unwrap().as_str(), "Ann");
    }

    #[test]
    fn test_required() {
        assert_eq!(DisplayName::new("").unwrap_err().message(), "Name is required");
        assert_eq!(DisplayName::new(" \t ").unwrap_err().message(), "Name is required");
    }

    #[test]
    fn test_length_bounds() {
        assert!(DisplayName::new("a").is_ok());
        assert!(DisplayName::new("a".repeat(50)).is_ok());
        assert!(DisplayName::new("a".repeat(51)).is_err());
        // counted in characters, not bytes
        assert!(DisplayName::new("é".repeat(50)).is_ok());
    }

    #[test]
    fn test_control_characters_rejected() {
        assert!(DisplayName::new("Ann\u{0007}").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(DisplayName::new("Ann").unwrap().to_string(), "Ann");
    }
}
