//! Postgres-backed credential store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Duplicate` |
//! | Database (other) | Any other | `Unavailable` |
//! | PoolTimedOut / PoolClosed / Io | N/A | `Unavailable` |
//!
//! Every call goes through the SQLx pool, so the store is `Send + Sync` and
//! can be shared by all request tasks.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::instrument;
use uuid::Uuid;

use empowrhr_auth::{Account, CredentialStore, Identifier, Role, SecretHash, StoreError};
use empowrhr_core::AccountId;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS accounts (
    id          UUID PRIMARY KEY,
    identifier  TEXT NOT NULL UNIQUE,
    secret_hash TEXT NOT NULL,
    role        TEXT NOT NULL CHECK (role IN ('superadmin', 'admin', 'employee')),
    created_at  TIMESTAMPTZ NOT NULL
)
"#;

/// Open a pool and make sure it can actually reach the server.
///
/// Callers treat a failure here as fatal; there is no retry.
pub async fn connect(database_url: &str, acquire_timeout: Duration) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))
}

#[derive(Debug, Clone)]
pub struct PostgresCredentialStore {
    pool: Arc<PgPool>,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Create the `accounts` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[instrument(skip_all, err)]
    async fn find(&self, identifier: &Identifier) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, identifier, secret_hash, role, created_at
            FROM accounts
            WHERE identifier = $1
            "#,
        )
        .bind(identifier.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find", e))?;

        row.map(|r| account_from_row(&r)).transpose()
    }

    #[instrument(skip_all, fields(role = %account.role))]
    async fn insert(&self, account: Account) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, identifier, secret_hash, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.identifier.as_str())
        .bind(account.secret_hash.as_phc())
        .bind(account.role.as_str())
        .bind(account.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;
        Ok(())
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, StoreError> {
    let decode = |e: sqlx::Error| StoreError::Unavailable(format!("failed to decode account row: {e}"));
    account_from_parts(
        row.try_get("id").map_err(decode)?,
        row.try_get("identifier").map_err(decode)?,
        row.try_get("secret_hash").map_err(decode)?,
        row.try_get("role").map_err(decode)?,
        row.try_get("created_at").map_err(decode)?,
    )
}

fn account_from_parts(
    id: Uuid,
    identifier: String,
    secret_hash: String,
    role: String,
    created_at: DateTime<Utc>,
) -> Result<Account, StoreError> {
    let corrupt = |e: empowrhr_core::DomainError| StoreError::Unavailable(format!("corrupt account row: {e}"));
    Ok(Account {
        id: AccountId::from_uuid(id),
        identifier: Identifier::parse(identifier).map_err(corrupt)?,
        secret_hash: SecretHash::from_phc(secret_hash),
        role: role.parse::<Role>().map_err(corrupt)?,
        created_at,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505") {
                StoreError::Duplicate
            } else {
                StoreError::Unavailable(format!("database error in {}: {}", operation, db_err.message()))
            }
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("timed out acquiring connection in {}", operation))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {}", operation))
        }
        other => StoreError::Unavailable(format!("sqlx error in {}: {}", operation, other)),
    }
}
