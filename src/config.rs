//! Process configuration, read once from the environment at startup.

use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub request_timeout: Duration,
    pub auth: AuthSettings,
}

/// Signing key and lifetimes for issued bearer tokens.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub access_token_ttl: chrono::Duration,
    pub admin_token_ttl: chrono::Duration,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_token_ttl: chrono::Duration::minutes(DEFAULT_TOKEN_MINUTES),
            admin_token_ttl: chrono::Duration::minutes(DEFAULT_TOKEN_MINUTES),
        }
    }
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_TOKEN_MINUTES: i64 = 15;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let access_minutes = parsed("ACCESS_TOKEN_EXPIRE_MINUTES", DEFAULT_TOKEN_MINUTES)?;
        let admin_minutes = parsed("ADMIN_TOKEN_EXPIRE_MINUTES", DEFAULT_TOKEN_MINUTES)?;
        let timeout_secs = parsed("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            database_url,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            auth: AuthSettings {
                jwt_secret,
                access_token_ttl: chrono::Duration::minutes(access_minutes),
                admin_token_ttl: chrono::Duration::minutes(admin_minutes),
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
