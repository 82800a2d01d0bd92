//! HTTP Handlers

use axum::Form;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use rand::seq::IndexedRandom;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangeRoleUseCase, ListUsersUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase,
};
use crate::domain::access::Access;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{session_token::SessionToken, user_role::UserRole};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LogInForm, SignUpForm};
use crate::presentation::view::{
    AdminRow, AdminView, Chrome, LandingView, LogInView, MembersView, NotFoundView, SignUpView,
    View,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// `302 Found` to `location`.
pub(crate) fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Redirect and hand the client its new session cookie.
fn found_with_session(config: &AuthConfig, token: &SessionToken, location: &'static str) -> Response {
    match platform::cookie::set_cookie_header(&config.session_cookie(), token.as_str()) {
        Ok(cookie) => {
            let mut response = found(location);
            response.headers_mut().insert(header::SET_COOKIE, cookie);
            response
        }
        Err(e) => AuthError::Internal(format!("session cookie: {e}")).into_response(),
    }
}

// ============================================================================
// Landing
// ============================================================================

/// GET /
pub async fn landing(access: Access) -> Html<String> {
    LandingView {
        chrome: Chrome::from_access(&access),
        name: access.user().map(|user| user.name.as_str().to_string()),
    }
    .render()
}

// ============================================================================
// Sign Up
// ============================================================================

/// GET /signup
pub async fn signup_form(access: Access) -> Html<String> {
    SignUpView {
        chrome: Chrome::from_access(&access),
        error: None,
        name: String::new(),
        email: String::new(),
    }
    .render()
}

/// POST /signup
///
/// Every failure re-renders the form with the submitted name and email and
/// the error's status. Store and hashing failures show the generic message
/// only. The password is never echoed.
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    access: Access,
    Form(form): Form<SignUpForm>,
) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let name = form.name.clone();
    let email = form.email.clone();

    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case.execute(form.into()).await {
        Ok(output) => found_with_session(&state.config, &output.session_token, "/members"),
        Err(e) => {
            e.log();
            let view = SignUpView {
                chrome: Chrome::from_access(&access),
                error: Some(e.public_message()),
                name,
                email,
            };
            (e.status_code(), view.render()).into_response()
        }
    }
}

// ============================================================================
// Log In
// ============================================================================

/// GET /login
pub async fn login_form(access: Access) -> Html<String> {
    LogInView {
        chrome: Chrome::from_access(&access),
        error: None,
        email: String::new(),
    }
    .render()
}

/// POST /login
///
/// An unknown email and a wrong password render the same page.
pub async fn log_in<R>(
    State(state): State<AuthAppState<R>>,
    access: Access,
    Form(form): Form<LogInForm>,
) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let email = form.email.clone();

    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    match use_case.execute(form.into()).await {
        Ok(output) => found_with_session(&state.config, &output.session_token, "/members"),
        Err(e @ (AuthError::Validation(_) | AuthError::InvalidCredentials)) => {
            e.log();
            let view = LogInView {
                chrome: Chrome::from_access(&access),
                error: Some(e.to_string()),
                email,
            };
            (e.status_code(), view.render()).into_response()
        }
        Err(e) => e.into_response(),
    }
}

// ============================================================================
// Log Out
// ============================================================================

/// GET /logout
///
/// Always clears the cookie, even if the session could not be deleted.
pub async fn log_out<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Failed to destroy session on logout");
        }
    }

    let mut response = found("/");
    match platform::cookie::delete_cookie_header(&state.config.session_cookie()) {
        Ok(cookie) => {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to build session cookie removal"),
    }
    response
}

// ============================================================================
// Members
// ============================================================================

/// GET /members (member gate)
pub async fn members<R>(State(state): State<AuthAppState<R>>, access: Access) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let Some(user) = access.user() else {
        return found("/");
    };

    let image = state.config.member_images.choose(&mut rand::rng()).cloned();

    MembersView {
        chrome: Chrome::from_access(&access),
        name: user.name.as_str().to_string(),
        image,
    }
    .render()
    .into_response()
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin (admin gate)
pub async fn admin<R>(
    State(state): State<AuthAppState<R>>,
    access: Access,
) -> AuthResult<Html<String>>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let users = ListUsersUseCase::new(state.repo.clone()).execute().await?;

    let users = users
        .into_iter()
        .map(|user| AdminRow {
            user_id: user.user_id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            user_type: user.user_role,
        })
        .collect();

    Ok(AdminView {
        chrome: Chrome::from_access(&access),
        users,
    }
    .render())
}

/// GET /admin/promote/{id} (admin gate)
pub async fn promote<R>(
    State(state): State<AuthAppState<R>>,
    access: Access,
    Path(id): Path<String>,
) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    change_role(&state, &access, &id, UserRole::Admin).await
}

/// GET /admin/demote/{id} (admin gate)
pub async fn demote<R>(
    State(state): State<AuthAppState<R>>,
    access: Access,
    Path(id): Path<String>,
) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    change_role(&state, &access, &id, UserRole::User).await
}

async fn change_role<R>(state: &AuthAppState<R>, access: &Access, id: &str, role: UserRole) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = ChangeRoleUseCase::new(state.repo.clone());

    match use_case.execute(id, role).await {
        Ok(()) => {
            if let Some(actor) = access.user() {
                tracing::info!(actor_user_id = %actor.user_id, target_user_id = %id, user_role = %role, "Role change by admin");
            }
            found("/admin")
        }
        Err(AuthError::UserNotFound) => {
            tracing::debug!(target_user_id = %id, "Role change for unknown user");
            not_found_page(access)
        }
        Err(e) => e.into_response(),
    }
}

// ============================================================================
// Fallback
// ============================================================================

/// Any unmatched route.
pub async fn not_found(access: Access) -> Response {
    not_found_page(&access)
}

fn not_found_page(access: &Access) -> Response {
    let view = NotFoundView {
        chrome: Chrome::from_access(access),
    };
    (StatusCode::NOT_FOUND, view.render()).into_response()
}
