//! Session Token Value Object
//!
//! The opaque value stored in the session cookie:
//! `"{session_id}.{base64url(HMAC-SHA256(secret, session_id))}"`.
//! The signature lets forged or truncated tokens be rejected without a
//! store round-trip.

use kernel::id::SessionId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Sign a session id.
    pub fn issue(session_id: SessionId, secret: &[u8; 32]) -> Self {
        let id = session_id.to_string();
        let signature = hmac_sha256(secret, id.as_bytes());
        Self(format!("{}.{}", id, to_base64url(&signature)))
    }

    /// Verify the signature and return the session id it carries.
    ///
    /// Any malformed, tampered or foreign-key token yields `None`.
    pub fn verify(token: &str, secret: &[u8; 32]) -> Option<SessionId> {
        let (id, signature_b64) = token.split_once('.')?;
        let signature = from_base64url(signature_b64).ok()?;

        if !verify_hmac_sha256(secret, id.as_bytes(), &signature) {
            return None;
        }

        SessionId::parse(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
