//! Access-control router.
//!
//! One compiled-in table says which roles may open which view. [`resolve`]
//! is the only guard; [`menu`] filters the same table for display and is
//! never consulted for enforcement.

use serde::Serialize;

use empowrhr_auth::{AccessExplanation, Role, RoleSet, authorize};

use crate::SessionSnapshot;

pub const LOGIN_PATH: &str = "/login";
pub const LOGOUT_PATH: &str = "/logout";
/// Where a successful login lands.
pub const LANDING_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewRule {
    pub path: &'static str,
    pub title: &'static str,
    pub permitted: RoleSet,
    /// Where a denied visitor is sent.
    pub denied_to: &'static str,
    /// Renders a different page per role.
    pub role_variants: bool,
}

const fn view(path: &'static str, title: &'static str, permitted: RoleSet, role_variants: bool) -> ViewRule {
    ViewRule {
        path,
        title,
        permitted,
        denied_to: LOGIN_PATH,
        role_variants,
    }
}

/// Protected views, in menu order.
pub const ROUTES: &[ViewRule] = &[
    view("/dashboard", "Dashboard", RoleSet::EVERYONE, true),
    view("/profile", "Profile", RoleSet::EVERYONE, true),
    view("/admins", "Admins", RoleSet::SUPERADMIN_ONLY, false),
    view("/employees", "Employees", RoleSet::MANAGERS, false),
    view("/attendance", "Attendance", RoleSet::EVERYONE, false),
    view("/leaves", "Leave Management", RoleSet::EVERYONE, false),
    view("/reports", "Reports", RoleSet::EVERYONE, true),
    view("/work-hours", "Work Hours", RoleSet::EVERYONE, true),
    view("/analytics", "Analytics", RoleSet::SUPERADMIN_ONLY, false),
    view("/salary", "Salary", RoleSet::SUPERADMIN_ONLY, false),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum Decision {
    Admit,
    Redirect(&'static str),
    NotFound,
}

/// Look up a protected view. A single trailing slash is ignored.
pub fn rule_for(path: &str) -> Option<&'static ViewRule> {
    let path = normalize(path);
    ROUTES.iter().find(|rule| rule.path == path)
}

/// Decide what happens when `session` asks for `path`.
///
/// `/` always redirects to the login page and the login page is always
/// admitted. `/logout` redirects to the login page; clearing the session is
/// the caller's job. Unknown paths are `NotFound`.
pub fn resolve(path: &str, session: &SessionSnapshot) -> Decision {
    match normalize(path) {
        "/" | LOGOUT_PATH => return Decision::Redirect(LOGIN_PATH),
        LOGIN_PATH => return Decision::Admit,
        _ => {}
    }

    let Some(rule) = rule_for(path) else {
        return Decision::NotFound;
    };

    match authorize(signed_in_role(session), rule.permitted, rule.path) {
        Ok(_) => Decision::Admit,
        Err(denied) => {
            tracing::debug!(path = rule.path, reason = %denied, "view denied");
            Decision::Redirect(rule.denied_to)
        }
    }
}

/// Access explanation for a protected view; `None` for public or unknown paths.
pub fn explain(path: &str, session: &SessionSnapshot) -> Option<AccessExplanation> {
    let rule = rule_for(path)?;
    Some(empowrhr_auth::explain(signed_in_role(session), rule.permitted, rule.path))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub path: &'static str,
    pub title: &'static str,
}

/// Views `role` may open, in table order. Empty when nobody is signed in.
pub fn menu(role: Option<Role>) -> Vec<MenuItem> {
    let Some(role) = role else {
        return Vec::new();
    };
    ROUTES
        .iter()
        .filter(|rule| rule.permitted.contains(role))
        .map(|rule| MenuItem {
            path: rule.path,
            title: rule.title,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", content = "role", rename_all = "snake_case")]
pub enum PageVariant {
    Shared,
    ForRole(Role),
}

/// Which page `role` gets at `path`, or `None` when it may not open it.
pub fn page_variant(path: &str, role: Role) -> Option<PageVariant> {
    let rule = rule_for(path)?;
    if !rule.permitted.contains(role) {
        return None;
    }
    Some(if rule.role_variants {
        PageVariant::ForRole(role)
    } else {
        PageVariant::Shared
    })
}

fn signed_in_role(session: &SessionSnapshot) -> Option<Role> {
    session.role.filter(|_| session.is_authenticated)
}

/// Drop one trailing slash, except from `/` itself.
pub(crate) fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}
