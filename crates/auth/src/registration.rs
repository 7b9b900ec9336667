use crate::Role;

/// How a new account gets its role.
///
/// The role cannot change after creation, so this decides it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationPolicy {
    /// Every new account gets this role; any role in the request is ignored.
    Fixed(Role),
    /// Use the role from the request, or this one when none was given.
    FromRequest(Role),
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        RegistrationPolicy::Fixed(Role::Employee)
    }
}

impl RegistrationPolicy {
    pub fn resolve(&self, requested: Option<Role>) -> Role {
        match (*self, requested) {
            (RegistrationPolicy::Fixed(role), _) => role,
            (RegistrationPolicy::FromRequest(_), Some(role)) => role,
            (RegistrationPolicy::FromRequest(fallback), None) => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_ignores_requested_role() {
        let policy = RegistrationPolicy::default();
        assert_eq!(policy.resolve(Some(Role::SuperAdmin)), Role::Employee);
        assert_eq!(policy.resolve(None), Role::Employee);
    }

    #[test]
    fn from_request_falls_back() {
        let policy = RegistrationPolicy::FromRequest(Role::Employee);
        assert_eq!(policy.resolve(Some(Role::Admin)), Role::Admin);
        assert_eq!(policy.resolve(None), Role::Employee);
    }
}
