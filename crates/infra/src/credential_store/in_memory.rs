use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use empowrhr_auth::{Account, CredentialStore, Identifier, StoreError};

/// In-memory credential store for tests/dev.
///
/// Contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<HashMap<Identifier, Account>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find(&self, identifier: &Identifier) -> Result<Option<Account>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Unavailable("credential map lock poisoned".into()))?;
        Ok(map.get(identifier).cloned())
    }

    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Unavailable("credential map lock poisoned".into()))?;
        if map.contains_key(&account.identifier) {
            return Err(StoreError::Duplicate);
        }
        map.insert(account.identifier.clone(), account);
        Ok(())
    }
}
