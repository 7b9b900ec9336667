//! Strongly-typed identifiers.

use uuid::Uuid;

/// Surrogate key of a stored account.
///
/// The login name is the natural key; this id only exists so storage rows
/// have a stable primary key that never leaks the login name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
