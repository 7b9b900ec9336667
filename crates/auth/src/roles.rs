use core::str::FromStr;

use serde::{Deserialize, Serialize};

use empowrhr_core::DomainError;

/// Role granted to an account.
///
/// Closed set: every account carries exactly one of these and it never
/// changes after creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    SuperAdmin,
    Admin,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::Employee];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superadmin",
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Role::SuperAdmin => 0b001,
            Role::Admin => 0b010,
            Role::Employee => 0b100,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "superadmin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "employee" => Ok(Role::Employee),
            other => Err(DomainError::unknown_variant("role", other)),
        }
    }
}

/// Set of roles permitted to do something (see a view, call an operation).
///
/// Small enough to be built in `const` context so route tables can be
/// declared as statics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    pub const EVERYONE: RoleSet = RoleSet::of(&Role::ALL);
    pub const SUPERADMIN_ONLY: RoleSet = RoleSet::of(&[Role::SuperAdmin]);
    pub const MANAGERS: RoleSet = RoleSet::of(&[Role::SuperAdmin, Role::Admin]);

    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        RoleSet(bits)
    }

    pub const fn contains(&self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }

    /// Members in declaration order of [`Role::ALL`].
    pub fn roles(&self) -> Vec<Role> {
        Role::ALL.into_iter().filter(|r| self.contains(*r)).collect()
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.roles())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("SuperAdmin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!(" employee ".parse::<Role>().unwrap(), Role::Employee);
    }

    #[test]
    fn rejects_roles_outside_the_closed_set() {
        let err = "manager".parse::<Role>().unwrap_err();
        assert!(matches!(err, DomainError::UnknownVariant { kind: "role", .. }));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"superadmin\"");
        let r: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(r, Role::Admin);
    }

    #[test]
    fn role_set_membership() {
        assert!(RoleSet::MANAGERS.contains(Role::Admin));
        assert!(!RoleSet::MANAGERS.contains(Role::Employee));
        assert!(RoleSet::EVERYONE.contains(Role::Employee));
        assert_eq!(RoleSet::SUPERADMIN_ONLY.roles(), vec![Role::SuperAdmin]);
    }

    #[test]
    fn role_set_ignores_order_and_repeats() {
        let built = RoleSet::of(&[Role::Admin, Role::SuperAdmin, Role::Admin]);
        assert_eq!(built, RoleSet::MANAGERS);
    }

    #[test]
    fn role_set_serializes_as_role_names() {
        let json = serde_json::to_value(RoleSet::MANAGERS).unwrap();
        assert_eq!(json, serde_json::json!(["superadmin", "admin"]));
    }
}
