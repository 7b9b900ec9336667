//! Transport to the authentication API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use empowrhr_auth::{IdentityAssertion, Identifier, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The server rejected the identifier/secret pair.
    #[error("invalid credentials")]
    Rejected,
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Anything that can turn credentials into an identity.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, identifier: &str, secret: &str) -> Result<IdentityAssertion, GatewayError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// API root, e.g. `http://localhost:5000/api`.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Serialize)]
struct LoginBody<'a> {
    identifier: &'a str,
    secret: &'a str,
}

#[derive(Deserialize)]
struct LoginReply {
    identifier: String,
    role: String,
}

#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, identifier: &str, secret: &str) -> Result<IdentityAssertion, GatewayError> {
        let url = format!("{}/auth/login", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&LoginBody { identifier, secret })
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Rejected);
        }
        if !status.is_success() {
            return Err(GatewayError::Api(status.as_u16(), resp.text().await.unwrap_or_default()));
        }

        let reply: LoginReply = resp.json().await.map_err(|e| GatewayError::Parse(e.to_string()))?;
        parse_reply(reply)
    }
}

fn parse_reply(reply: LoginReply) -> Result<IdentityAssertion, GatewayError> {
    Ok(IdentityAssertion {
        identifier: Identifier::parse(reply.identifier).map_err(|e| GatewayError::Parse(e.to_string()))?,
        role: reply
            .role
            .parse::<Role>()
            .map_err(|e| GatewayError::Parse(e.to_string()))?,
    })
}
