use serde::{Deserialize, Serialize};

use empowrhr_auth::IdentityAssertion;

// -------------------------
// Request DTOs
// -------------------------

/// `username`/`password` are accepted as aliases for older clients.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub identifier: String,
    #[serde(alias = "password")]
    pub secret: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "username")]
    pub identifier: String,
    #[serde(alias = "password")]
    pub secret: String,
    pub role: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub identifier: String,
    pub role: &'static str,
}

impl From<IdentityAssertion> for LoginResponse {
    fn from(value: IdentityAssertion) -> Self {
        Self {
            identifier: value.identifier.into(),
            role: value.role.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
