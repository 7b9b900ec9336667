//! Service wiring: picks the credential store and builds the auth service.

use std::sync::Arc;

use anyhow::Context;

use empowrhr_auth::{AuthService, CredentialStore};
use empowrhr_infra::credential_store::{self, InMemoryCredentialStore, PostgresCredentialStore};

use crate::config::ApiConfig;

/// Everything request handlers need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
}

impl AppServices {
    pub fn new(store: Arc<dyn CredentialStore>, config: &ApiConfig) -> anyhow::Result<Self> {
        let auth = AuthService::new(store, config.password.clone(), config.registration)
            .context("invalid password policy")?;
        Ok(Self { auth })
    }

    /// Process-local store; accounts vanish on restart.
    pub fn in_memory(config: &ApiConfig) -> anyhow::Result<Self> {
        Self::new(Arc::new(InMemoryCredentialStore::new()), config)
    }
}

/// Connect the configured store.
///
/// With `DATABASE_URL` set, an unreachable database is an error the caller
/// must treat as fatal. Without it, falls back to the in-memory store.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using in-memory credential store");
        return AppServices::in_memory(config);
    };

    let pool = credential_store::connect(url, config.db_connect_timeout)
        .await
        .context("failed to connect to credential store")?;
    let store = PostgresCredentialStore::new(pool);
    store
        .ensure_schema()
        .await
        .context("failed to prepare credential store schema")?;

    tracing::info!("credential store connected");
    AppServices::new(Arc::new(store), config)
}
