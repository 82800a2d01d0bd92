//! Auth Middleware
//!
//! `resolve_session` runs on every request and inserts the caller's
//! [`Access`] into the request extensions. The gates on protected route
//! groups read it back and allow, redirect, or forbid.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::CheckSessionUseCase;
use crate::domain::access::{Access, Decision, Requirement};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::AuthError;
use crate::presentation::handlers::{AuthAppState, found};
use crate::presentation::view::{Chrome, ForbiddenView, View};

/// Resolve the session cookie into an [`Access`] for downstream handlers.
///
/// A cookie that no longer names a live session (bad signature, expired,
/// deleted, or its user is gone) makes the request anonymous and is cleared
/// on the way out. Store failures short-circuit with an error page.
pub async fn resolve_session<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let cookie_name = state.config.session_cookie_name.as_str();
    let token = platform::cookie::extract_cookie(req.headers(), cookie_name);

    let mut clear_cookie = false;
    let access = match token {
        None => Access::Anonymous,
        Some(token) => {
            let use_case =
                CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
            match use_case.execute(&token).await {
                Ok(session) => Access::from_session(&session),
                Err(AuthError::SessionInvalid | AuthError::UserNotFound) => {
                    clear_cookie = true;
                    Access::Anonymous
                }
                Err(e) => return e.into_response(),
            }
        }
    };

    req.extensions_mut().insert(access);
    let mut response = next.run(req).await;

    if clear_cookie && !sets_cookie(&response, cookie_name) {
        match platform::cookie::delete_cookie_header(&state.config.session_cookie()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::warn!(error = %e, "Failed to build session cookie removal"),
        }
    }

    response
}

/// Whether a handler already wrote (or removed) the named cookie.
fn sets_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| {
            value
                .split_once('=')
                .is_some_and(|(cookie, _)| cookie.trim() == name)
        })
}

/// Gate for routes any logged-in user may see.
pub async fn require_member(req: Request, next: Next) -> Response {
    gate(Requirement::Member, req, next).await
}

/// Gate for admin-only routes.
pub async fn require_admin(req: Request, next: Next) -> Response {
    gate(Requirement::Admin, req, next).await
}

async fn gate(requirement: Requirement, req: Request, next: Next) -> Response {
    let access = req.extensions().get::<Access>().cloned().unwrap_or_default();

    match access.decide(requirement) {
        Decision::Allow => next.run(req).await,
        Decision::RedirectToLanding => found("/"),
        Decision::Forbidden => {
            AuthError::Forbidden.log();
            let view = ForbiddenView {
                chrome: Chrome::from_access(&access),
            };
            (StatusCode::FORBIDDEN, view.render()).into_response()
        }
    }
}

/// Handlers take the resolved [`Access`] as an argument. Requests that never
/// passed [`resolve_session`] are anonymous.
impl<S> FromRequestParts<S> for Access
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Access>().cloned().unwrap_or_default())
    }
}
