//! `empowrhr-auth` — authentication and role authorization boundary.
//!
//! This crate is decoupled from HTTP and from any concrete storage: it owns
//! the account model, secret hashing, the credential-store contract and the
//! role capability checks that every view guard goes through.

pub mod account;
pub mod authorize;
pub mod password;
pub mod registration;
pub mod roles;
pub mod service;
pub mod store;

pub use account::{Account, IdentityAssertion, Identifier, SecretHash};
pub use authorize::{AccessExplanation, AuthzError, DenialKind, authorize, explain};
pub use password::{HashError, PasswordPolicy, SecretHasher};
pub use registration::RegistrationPolicy;
pub use roles::{Role, RoleSet};
pub use service::{AuthError, AuthService, INVALID_CREDENTIALS};
pub use store::{CredentialStore, StoreError};
