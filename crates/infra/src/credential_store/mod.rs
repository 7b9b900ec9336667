//! Credential store adapters.
//!
//! - `InMemoryCredentialStore`: process-local, for dev and tests.
//! - `PostgresCredentialStore`: durable, used when `DATABASE_URL` is set.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCredentialStore;
pub use postgres::{PostgresCredentialStore, connect};
