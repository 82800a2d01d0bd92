//! Server-rendered pages
//!
//! One typed view per page. Every view carries the layout fields
//! ([`Chrome`]) plus its own data; all interpolated text goes through
//! [`escape`].

use axum::response::Html;
use kernel::error::kind::ErrorKind;

use crate::domain::access::Access;
use crate::domain::value_object::user_role::UserRole;

/// Layout fields shared by every page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chrome {
    pub authenticated: bool,
    pub user_type: Option<UserRole>,
}

impl Chrome {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_access(access: &Access) -> Self {
        Self {
            authenticated: access.is_authenticated(),
            user_type: access.role(),
        }
    }

    fn is_admin(&self) -> bool {
        self.user_type.is_some_and(|role| role.is_admin())
    }
}

pub trait View {
    fn chrome(&self) -> Chrome;
    fn title(&self) -> String;
    fn body(&self) -> String;

    fn render(&self) -> Html<String> {
        Html(layout(self.chrome(), &self.title(), &self.body()))
    }
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(chrome: Chrome, title: &str, body: &str) -> String {
    let mut nav = String::from(r#"<a href="/">Home</a>"#);
    if chrome.authenticated {
        nav.push_str(r#" <a href="/members">Members</a>"#);
        if chrome.is_admin() {
            nav.push_str(r#" <a href="/admin">Admin</a>"#);
        }
        nav.push_str(r#" <a href="/logout">Log out</a>"#);
    } else {
        nav.push_str(r#" <a href="/signup">Sign up</a> <a href="/login">Log in</a>"#);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<nav>{nav}</nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn error_banner(error: &Option<String>) -> String {
    match error {
        Some(message) => format!(r#"<p class="error" role="alert">{}</p>"#, escape(message)),
        None => String::new(),
    }
}

// ============================================================================
// Pages
// ============================================================================

pub struct LandingView {
    pub chrome: Chrome,
    pub name: Option<String>,
}

impl View for LandingView {
    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn title(&self) -> String {
        "Members".to_string()
    }

    fn body(&self) -> String {
        match &self.name {
            Some(name) => format!(
                r#"<p>Hello, {}!</p>
<p><a href="/members">Go to the members area</a> or <a href="/logout">log out</a>.</p>"#,
                escape(name)
            ),
            None => r#"<p>Welcome. <a href="/signup">Sign up</a> or <a href="/login">log in</a> to see the members area.</p>"#
                .to_string(),
        }
    }
}

pub struct SignUpView {
    pub chrome: Chrome,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
}

impl View for SignUpView {
    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn title(&self) -> String {
        "Sign up".to_string()
    }

    fn body(&self) -> String {
        format!(
            r#"{error}<form method="post" action="/signup">
<label>Name <input name="name" type="text" maxlength="50" value="{name}"></label>
<label>Email <input name="email" type="email" value="{email}"></label>
<label>Password <input name="password" type="password" minlength="8"></label>
<button type="submit">Sign up</button>
</form>
<p>Already a member? <a href="/login">Log in</a></p>"#,
            error = error_banner(&self.error),
            name = escape(&self.name),
            email = escape(&self.email),
        )
    }
}

pub struct LogInView {
    pub chrome: Chrome,
    pub error: Option<String>,
    pub email: String,
}

impl View for LogInView {
    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn title(&self) -> String {
        "Log in".to_string()
    }

    fn body(&self) -> String {
        format!(
            r#"{error}<form method="post" action="/login">
<label>Email <input name="email" type="email" value="{email}"></label>
<label>Password <input name="password" type="password"></label>
<button type="submit">Log in</button>
</form>
<p>New here? <a href="/signup">Sign up</a></p>"#,
            error = error_banner(&self.error),
            email = escape(&self.email),
        )
    }
}

pub struct MembersView {
    pub chrome: Chrome,
    pub name: String,
    /// URL path of the picked image
    pub image: Option<String>,
}

impl View for MembersView {
    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn title(&self) -> String {
        "Members area".to_string()
    }

    fn body(&self) -> String {
        let image = match &self.image {
            Some(src) => format!(r#"<img src="{}" alt="Members only" width="300">"#, escape(src)),
            None => String::new(),
        };
        format!("<p>Hello, {}.</p>\n{}", escape(&self.name), image)
    }
}

pub struct AdminRow {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub user_type: UserRole,
}

pub struct AdminView {
    pub chrome: Chrome,
    pub users: Vec<AdminRow>,
}

impl View for AdminView {
    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn title(&self) -> String {
        "Admin".to_string()
    }

    fn body(&self) -> String {
        let rows: String = self
            .users
            .iter()
            .map(|row| {
                let id = escape(&row.user_id);
                let action = match row.user_type {
                    UserRole::Admin => format!(r#"<a href="/admin/demote/{id}">Demote to user</a>"#),
                    UserRole::User => format!(r#"<a href="/admin/promote/{id}">Promote to admin</a>"#),
                };
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape(&row.name),
                    escape(&row.email),
                    row.user_type.code(),
                    action
                )
            })
            .collect();

        format!(
            "<table>\n<thead><tr><th>Name</th><th>Email</th><th>Type</th><th></th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>"
        )
    }
}

pub struct ForbiddenView {
    pub chrome: Chrome,
}

impl View for ForbiddenView {
    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn title(&self) -> String {
        "Forbidden".to_string()
    }

    fn body(&self) -> String {
        r#"<p>You are logged in, but this page is for administrators only.</p>
<p><a href="/members">Back to the members area</a></p>"#
            .to_string()
    }
}

pub struct NotFoundView {
    pub chrome: Chrome,
}

impl View for NotFoundView {
    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn title(&self) -> String {
        "Page not found".to_string()
    }

    fn body(&self) -> String {
        r#"<p>There is nothing here. <a href="/">Go home</a></p>"#.to_string()
    }
}

pub struct ErrorView {
    pub chrome: Chrome,
    pub kind: ErrorKind,
    pub message: String,
}

impl View for ErrorView {
    fn chrome(&self) -> Chrome {
        self.chrome
    }

    fn title(&self) -> String {
        self.kind.as_str().to_string()
    }

    fn body(&self) -> String {
        format!(
            r#"<p>{}</p>
<p><a href="/">Go home</a></p>"#,
            escape(&self.message)
        )
    }
}
