//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod manage_roles;
pub mod session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod validation;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use manage_roles::{ChangeRoleUseCase, ListUsersUseCase};
pub use session::SessionManager;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use validation::Validate;
