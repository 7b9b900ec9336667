use serde::Serialize;
use thiserror::Error;

use crate::{Role, RoleSet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("unauthorized: role '{role}' may not access '{resource}'")]
    Unauthorized { role: Role, resource: String },
}

/// Check that the caller's role is a member of `permitted`.
///
/// `role` is `None` when nobody is signed in.
///
/// - No IO
/// - No panics
pub fn authorize(role: Option<Role>, permitted: RoleSet, resource: &str) -> Result<Role, AuthzError> {
    let role = role.ok_or(AuthzError::Unauthenticated)?;
    if permitted.contains(role) {
        Ok(role)
    } else {
        Err(AuthzError::Unauthorized {
            role,
            resource: resource.to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Why an access decision came out the way it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessExplanation {
    pub resource: String,
    pub granted: bool,
    pub reason: String,
    pub role: Option<Role>,
    pub permitted_roles: RoleSet,
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Unauthenticated,
    RoleNotPermitted,
}

/// Same decision as [`authorize`], spelled out for debugging a denial.
pub fn explain(role: Option<Role>, permitted: RoleSet, resource: &str) -> AccessExplanation {
    let (granted, reason, denial) = match authorize(role, permitted, resource) {
        Ok(role) => (true, format!("role '{role}' is permitted"), None),
        Err(AuthzError::Unauthenticated) => (
            false,
            "no one is signed in".to_string(),
            Some(DenialKind::Unauthenticated),
        ),
        Err(AuthzError::Unauthorized { role, .. }) => {
            let allowed: Vec<&str> = permitted.roles().iter().map(Role::as_str).collect();
            (
                false,
                format!("role '{role}' is not one of {allowed:?}"),
                Some(DenialKind::RoleNotPermitted),
            )
        }
    };

    AccessExplanation {
        resource: resource.to_string(),
        granted,
        reason,
        role,
        permitted_roles: permitted,
        denial,
    }
}
