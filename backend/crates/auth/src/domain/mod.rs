//! Domain Layer
//!
//! Entities, value objects, access rules and repository traits.

pub mod access;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use access::{Access, Decision, Requirement, SessionUser};
pub use entity::{auth_session::AuthSession, user::User};
pub use repository::{AuthSessionRepository, UserRepository};
