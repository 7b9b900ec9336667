//! Infrastructure layer: storage adapters for the auth boundary.

pub mod credential_store;

pub use credential_store::{InMemoryCredentialStore, PostgresCredentialStore};
