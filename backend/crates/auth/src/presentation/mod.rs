//! Presentation Layer
//!
//! HTTP handlers, form DTOs, views, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod view;

pub use handlers::AuthAppState;
pub use middleware::{require_admin, require_member, resolve_session};
pub use router::{members_router, members_router_generic};
