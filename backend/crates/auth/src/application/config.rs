//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use platform::cookie::SameSite;
use platform::cookie::CookieConfig;

/// Images the members page picks from, as URL paths under the static mount.
pub const DEFAULT_MEMBER_IMAGES: &[&str] = &[
    "/static/images/aurora.svg",
    "/static/images/harbor.svg",
    "/static/images/meadow.svg",
];

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub session_cookie_name: String,
    /// HMAC key for session tokens (32 bytes)
    pub session_secret: [u8; 32],
    /// Absolute session lifetime
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Application-wide secret appended to passwords before hashing
    pub password_pepper: Option<Arc<[u8]>>,
    pub member_images: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "members.sid".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            member_images: DEFAULT_MEMBER_IMAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .field("member_images", &self.member_images)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Random secret and a cookie that works over plain HTTP
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::hours(1))
    }

    pub fn pepper(&self) -> Option<Arc<[u8]>> {
        self.password_pepper.clone()
    }

    /// Cookie attributes for the session cookie. Max-Age matches the
    /// server-side lifetime.
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.as_secs() as i64),
        }
    }
}
