//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, access rules, repository traits
//! - `application/` - Use cases and the session manager
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - Handlers, form DTOs, views, router, middleware
//!
//! ## Features
//! - Sign up and log in with name, email and password
//! - Server-side sessions behind a signed, HttpOnly cookie token
//! - Member-only and admin-only pages; admins promote and demote users
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optionally peppered
//! - Session tokens are HMAC-SHA256 signed and expire one hour after login
//! - Sessions whose user no longer exists are discarded on sight
//! - Login failures give one message whichever check failed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session::SessionManager;
pub use domain::access::{Access, Decision, Requirement};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::{members_router, members_router_generic};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
