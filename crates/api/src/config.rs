//! Process configuration, read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BIND_ADDR` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `DATABASE_URL` | unset (in-memory store) |
//! | `DB_CONNECT_TIMEOUT_SECS` | `10` |
//! | `CORS_ORIGIN` | `http://localhost:3000` |
//! | `REGISTRATION_ROLE_POLICY` | `fixed` (`fixed` or `request`) |
//! | `REGISTRATION_DEFAULT_ROLE` | `employee` |
//! | `PASSWORD_MIN_LENGTH` | `6` |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use empowrhr_auth::{PasswordPolicy, RegistrationPolicy, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value '{value}' for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub db_connect_timeout: Duration,
    pub cors_origin: String,
    pub password: PasswordPolicy,
    pub registration: RegistrationPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 5000,
            database_url: None,
            db_connect_timeout: Duration::from_secs(10),
            cors_origin: "http://localhost:3000".to_string(),
            password: PasswordPolicy::default(),
            registration: RegistrationPolicy::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key→value source. Unset or blank keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let default_role = match get("REGISTRATION_DEFAULT_ROLE") {
            Some(v) => parse::<Role>("REGISTRATION_DEFAULT_ROLE", v)?,
            None => Role::Employee,
        };
        let registration = match get("REGISTRATION_ROLE_POLICY").as_deref() {
            None | Some("fixed") => RegistrationPolicy::Fixed(default_role),
            Some("request") => RegistrationPolicy::FromRequest(default_role),
            Some(other) => {
                return Err(ConfigError {
                    key: "REGISTRATION_ROLE_POLICY",
                    value: other.to_string(),
                    reason: "expected 'fixed' or 'request'".to_string(),
                });
            }
        };

        let mut password = defaults.password;
        if let Some(v) = get("PASSWORD_MIN_LENGTH") {
            password.min_length = parse("PASSWORD_MIN_LENGTH", v)?;
        }

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: match get("PORT") {
                Some(v) => parse("PORT", v)?,
                None => defaults.port,
            },
            database_url: get("DATABASE_URL"),
            db_connect_timeout: match get("DB_CONNECT_TIMEOUT_SECS") {
                Some(v) => Duration::from_secs(parse("DB_CONNECT_TIMEOUT_SECS", v)?),
                None => defaults.db_connect_timeout,
            },
            cors_origin: get("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            password,
            registration,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ApiConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.listen_addr(), "0.0.0.0:5000");
        assert_eq!(config.registration, RegistrationPolicy::Fixed(Role::Employee));
    }

    #[test]
    fn reads_overrides() {
        let config = from_pairs(&[
            ("PORT", "8081"),
            ("DATABASE_URL", "postgres://localhost/empowrhr"),
            ("REGISTRATION_ROLE_POLICY", "request"),
            ("REGISTRATION_DEFAULT_ROLE", "admin"),
            ("PASSWORD_MIN_LENGTH", "10"),
            ("DB_CONNECT_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/empowrhr"));
        assert_eq!(config.registration, RegistrationPolicy::FromRequest(Role::Admin));
        assert_eq!(config.password.min_length, 10);
        assert_eq!(config.db_connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = from_pairs(&[("DATABASE_URL", "  "), ("PORT", "")]).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn rejects_bad_values() {
        let err = from_pairs(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.key, "PORT");

        let err = from_pairs(&[("REGISTRATION_ROLE_POLICY", "open")]).unwrap_err();
        assert_eq!(err.key, "REGISTRATION_ROLE_POLICY");

        let err = from_pairs(&[("REGISTRATION_DEFAULT_ROLE", "manager")]).unwrap_err();
        assert_eq!(err.key, "REGISTRATION_DEFAULT_ROLE");
    }
}
