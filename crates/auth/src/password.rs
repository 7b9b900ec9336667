//! One-way secret hashing (Argon2id, PHC strings).

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::{Algorithm, Argon2, Params, Version};

use thiserror::Error;

use empowrhr_core::DomainError;

use crate::SecretHash;

/// Secret acceptance + Argon2 cost parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub argon2_memory_cost: u32,
    pub argon2_time_cost: u32,
    pub argon2_parallelism: u32,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 6,
            argon2_memory_cost: 19_456,
            argon2_time_cost: 2,
            argon2_parallelism: 1,
        }
    }
}

impl PasswordPolicy {
    /// Cheap parameters for tests. Never use in production.
    pub fn insecure_fast() -> Self {
        Self {
            min_length: 6,
            argon2_memory_cost: 8,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    /// Checks a secret offered at registration.
    pub fn check(&self, secret: &str) -> Result<(), DomainError> {
        if secret.chars().count() < self.min_length {
            return Err(DomainError::validation(format!(
                "secret must be at least {} characters",
                self.min_length
            )));
        }
        Ok(())
    }
}

/// Hashing itself failed. Never caused by the caller's input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to hash secret: {0}")]
pub struct HashError(pub String);

/// Hashes and verifies secrets.
///
/// Cloning is cheap. Holds a precomputed hash of a throwaway secret so that a
/// lookup miss can still pay for one full verification.
#[derive(Clone)]
pub struct SecretHasher {
    params: Params,
    dummy: Arc<SecretHash>,
}

impl core::fmt::Debug for SecretHasher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretHasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

impl SecretHasher {
    pub fn new(policy: &PasswordPolicy) -> Result<Self, DomainError> {
        let params = Params::new(
            policy.argon2_memory_cost,
            policy.argon2_time_cost,
            policy.argon2_parallelism,
            None,
        )
        .map_err(|e| DomainError::validation(format!("invalid argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            dummy: Arc::new(SecretHash::from_phc(String::new())),
        };
        let dummy = hasher
            .hash("empowrhr:unknown-account")
            .map_err(|e| DomainError::validation(format!("argon2 parameters unusable: {e}")))?;
        hasher.dummy = Arc::new(dummy);
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, secret: &str) -> Result<SecretHash, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| HashError(e.to_string()))?;
        Ok(SecretHash::from_phc(phc.to_string()))
    }

    /// Constant-time verification. A malformed stored hash never matches.
    pub fn verify(&self, secret: &str, hash: &SecretHash) -> bool {
        match PasswordHash::new(hash.as_phc()) {
            Ok(parsed) => self.argon2().verify_password(secret.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }

    /// Burn one verification against the dummy hash. Always `false`.
    pub fn verify_dummy(&self, secret: &str) -> bool {
        let _ = self.verify(secret, &self.dummy);
        false
    }
}
