//! Account records and the identity they assert once authenticated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use empowrhr_core::{AccountId, DomainError};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Identifier
// ─────────────────────────────────────────────────────────────────────────────

/// Login name of an account. Unique across all accounts.
///
/// Surrounding whitespace is stripped; the remaining text must be non-empty.
/// Comparison is exact (no case folding).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("identifier cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Identifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identifier {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Secret hash
// ─────────────────────────────────────────────────────────────────────────────

/// PHC-formatted one-way hash of an account secret.
///
/// `Debug` is redacted so the hash never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_phc(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretHash(<redacted>)")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Account
// ─────────────────────────────────────────────────────────────────────────────

/// Stored credential + role record.
///
/// # Invariants
/// - `identifier` is unique across the store.
/// - `role` is fixed at creation; there is no role-change flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub identifier: Identifier,
    pub secret_hash: SecretHash,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(identifier: Identifier, secret_hash: SecretHash, role: Role) -> Self {
        Self {
            id: AccountId::new(),
            identifier,
            secret_hash,
            role,
            created_at: Utc::now(),
        }
    }

    pub fn assertion(&self) -> IdentityAssertion {
        IdentityAssertion {
            identifier: self.identifier.clone(),
            role: self.role,
        }
    }
}

/// Result of a successful login: who the caller is and what role they hold.
///
/// Carries no expiry, signature or revocation handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAssertion {
    pub identifier: Identifier,
    pub role: Role,
}
