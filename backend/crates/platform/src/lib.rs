//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations that carry no business meaning:
//! - Cryptographic utilities (HMAC-SHA256, random bytes, Base64)
//! - Password hashing (Argon2id) with blocking-pool offload
//! - Cookie building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
