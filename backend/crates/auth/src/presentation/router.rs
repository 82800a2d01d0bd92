//! Members Router

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{require_admin, require_member, resolve_session};

/// Create the site router with the PostgreSQL repository
pub fn members_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    members_router_generic(repo, config)
}

/// Create the site router for any repository implementation
///
/// Every route but `/logout`, the fallback included, sits behind
/// [`resolve_session`]. Logout reads the cookie itself so it still ends the
/// visit when the session store is unreachable. `/members` requires a
/// session; `/admin` and the role changes require an admin session.
pub fn members_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let member_routes = Router::new()
        .route("/members", get(handlers::members::<R>))
        .route_layer(from_fn(require_member));

    let admin_routes = Router::new()
        .route("/admin", get(handlers::admin::<R>))
        .route("/admin/promote/{id}", get(handlers::promote::<R>))
        .route("/admin/demote/{id}", get(handlers::demote::<R>))
        .route_layer(from_fn(require_admin));

    Router::new()
        .route("/", get(handlers::landing))
        .route("/signup", get(handlers::signup_form).post(handlers::sign_up::<R>))
        .route("/login", get(handlers::login_form).post(handlers::log_in::<R>))
        .merge(member_routes)
        .merge(admin_routes)
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), resolve_session::<R>))
        // Added after the layer, so not wrapped by it
        .route("/logout", get(handlers::log_out::<R>))
        .with_state(state)
}
