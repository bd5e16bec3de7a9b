//! Process configuration, read once from the environment.
//!
//! Values that are present but unparseable fall back to their default with a
//! warning; only `DATABASE_URL` is mandatory.

use std::time::Duration;

use mockable::Env;
use thiserror::Error;

use crate::constants::{
    DEFAULT_DB_IDLE_TIMEOUT_SECS, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MAX_LIFETIME_SECS,
    DEFAULT_DB_MIN_CONNECTIONS, DEFAULT_REQUEST_TIMEOUT_SECS,
};

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const DB_MAX_CONNECTIONS_ENV: &str = "USERBASE_DB_MAX_CONNECTIONS";
pub const DB_MIN_CONNECTIONS_ENV: &str = "USERBASE_DB_MIN_CONNECTIONS";
pub const DB_MAX_LIFETIME_ENV: &str = "USERBASE_DB_MAX_LIFETIME_SECS";
pub const DB_IDLE_TIMEOUT_ENV: &str = "USERBASE_DB_IDLE_TIMEOUT_SECS";
pub const REQUEST_TIMEOUT_ENV: &str = "USERBASE_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("database environment configuration is not set: {name}")]
    MissingEnv { name: &'static str },
}

/// Connection and deadline settings passed explicitly to constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Config with default pool and deadline settings for `database_url`.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            min_connections: DEFAULT_DB_MIN_CONNECTIONS,
            max_lifetime: Duration::from_secs(DEFAULT_DB_MAX_LIFETIME_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_DB_IDLE_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let database_url = env
            .string(DATABASE_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingEnv { name: DATABASE_URL_ENV })?;

        Ok(Self {
            database_url,
            max_connections: env_parse_with_default(
                env,
                DB_MAX_CONNECTIONS_ENV,
                DEFAULT_DB_MAX_CONNECTIONS,
            ),
            min_connections: env_parse_with_default(
                env,
                DB_MIN_CONNECTIONS_ENV,
                DEFAULT_DB_MIN_CONNECTIONS,
            ),
            max_lifetime: Duration::from_secs(env_parse_with_default(
                env,
                DB_MAX_LIFETIME_ENV,
                DEFAULT_DB_MAX_LIFETIME_SECS,
            )),
            idle_timeout: Duration::from_secs(env_parse_with_default(
                env,
                DB_IDLE_TIMEOUT_ENV,
                DEFAULT_DB_IDLE_TIMEOUT_SECS,
            )),
            request_timeout: Duration::from_secs(env_parse_with_default(
                env,
                REQUEST_TIMEOUT_ENV,
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
        })
    }
}

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<E, T>(env: &E, var: &str, default: T) -> T
where
    E: Env,
    T: std::str::FromStr + std::fmt::Display,
{
    match env.string(var) {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}
