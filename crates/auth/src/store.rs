//! Credential store contract.
//!
//! Adapters live in `empowrhr-infra`; this crate only depends on the trait.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::{Account, Identifier};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An account with the same identifier already exists.
    #[error("identifier already exists")]
    Duplicate,

    /// The backing store could not serve the request.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence of [`Account`] records keyed by [`Identifier`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find(&self, identifier: &Identifier) -> Result<Option<Account>, StoreError>;

    /// Insert a new account. Must fail with [`StoreError::Duplicate`] and
    /// leave the stored record untouched when the identifier is taken.
    async fn insert(&self, account: Account) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    async fn find(&self, identifier: &Identifier) -> Result<Option<Account>, StoreError> {
        (**self).find(identifier).await
    }

    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        (**self).insert(account).await
    }
}
