//! Authentication service: credential verification and account registration.

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;

use empowrhr_core::DomainError;

use crate::{
    Account, CredentialStore, HashError, IdentityAssertion, Identifier, PasswordPolicy,
    RegistrationPolicy, Role, SecretHasher, StoreError,
};

/// The one message every failed login produces.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown identifier or wrong secret. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("identifier already exists")]
    DuplicateIdentifier,

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Duplicate => AuthError::DuplicateIdentifier,
            StoreError::Unavailable(msg) => AuthError::StoreUnavailable(msg),
        }
    }
}

impl From<HashError> for AuthError {
    fn from(value: HashError) -> Self {
        AuthError::Internal(value.to_string())
    }
}

/// Verifies credentials against a [`CredentialStore`] and registers accounts.
///
/// No tokens are issued: a successful login returns the identity directly.
/// No rate limiting, lockout or audit trail.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: SecretHasher,
    password_policy: PasswordPolicy,
    registration: RegistrationPolicy,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        password_policy: PasswordPolicy,
        registration: RegistrationPolicy,
    ) -> Result<Self, DomainError> {
        let hasher = SecretHasher::new(&password_policy)?;
        Ok(Self {
            store,
            hasher,
            password_policy,
            registration,
        })
    }

    pub fn registration_policy(&self) -> RegistrationPolicy {
        self.registration
    }

    #[instrument(skip_all, fields(identifier = %identifier.trim()))]
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<IdentityAssertion, AuthError> {
        let identifier = Identifier::parse(identifier)
            .map_err(|_| DomainError::validation("identifier and secret are required"))?;
        if secret.is_empty() {
            return Err(DomainError::validation("identifier and secret are required").into());
        }

        let account = self.store.find(&identifier).await.map_err(|e| {
            tracing::error!(error = %e, "credential lookup failed");
            AuthError::from(e)
        })?;

        // A miss still runs one verification so response time does not tell
        // the caller whether the identifier exists.
        let hasher = self.hasher.clone();
        let secret = secret.to_owned();
        let verified = match account {
            Some(account) => {
                let hash = account.secret_hash.clone();
                let ok = blocking(move || hasher.verify(&secret, &hash)).await?;
                ok.then(|| account.assertion())
            }
            None => {
                blocking(move || hasher.verify_dummy(&secret)).await?;
                None
            }
        };

        match verified {
            Some(assertion) => {
                tracing::info!(role = %assertion.role, "login succeeded");
                Ok(assertion)
            }
            None => {
                tracing::info!("login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    #[instrument(skip_all, fields(identifier = %identifier.trim()))]
    pub async fn register(
        &self,
        identifier: &str,
        secret: &str,
        requested_role: Option<Role>,
    ) -> Result<IdentityAssertion, AuthError> {
        let identifier = Identifier::parse(identifier)?;
        self.password_policy.check(secret)?;

        let role = self.registration.resolve(requested_role);
        if let Some(requested) = requested_role {
            if requested != role {
                tracing::warn!(%requested, assigned = %role, "requested role ignored by registration policy");
            }
        }

        // Cheap pre-check; `insert` still enforces uniqueness under races.
        let existing = self.store.find(&identifier).await.map_err(|e| {
            tracing::error!(error = %e, "credential lookup failed");
            AuthError::from(e)
        })?;
        if existing.is_some() {
            tracing::info!("registration rejected: identifier taken");
            return Err(AuthError::DuplicateIdentifier);
        }

        let hasher = self.hasher.clone();
        let secret = secret.to_owned();
        let secret_hash = blocking(move || hasher.hash(&secret)).await??;

        let account = Account::new(identifier, secret_hash, role);
        let assertion = account.assertion();
        self.store.insert(account).await.map_err(|e| {
            if !matches!(e, StoreError::Duplicate) {
                tracing::error!(error = %e, "failed to persist account");
            }
            AuthError::from(e)
        })?;

        tracing::info!(%role, "account registered");
        Ok(assertion)
    }
}

async fn blocking<T, F>(f: F) -> Result<T, AuthError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(format!("hashing task failed: {e}")))
}
