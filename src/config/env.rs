//! Server configuration from environment variables (after `.env` is loaded).
//! Database credentials always come from the environment.

use crate::error::ConfigError;
use axum::http::HeaderValue;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub port: u16,
    pub max_connections: u32,
    /// Overrides any `sslmode` in the URL when set.
    pub ssl_mode: Option<PgSslMode>,
    /// Create the database through the `postgres` maintenance DB when missing.
    pub create_database: bool,
    /// Empty means any origin is allowed.
    pub cors_allow_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let max_connections = parse_or(
            get("DATABASE_MAX_CONNECTIONS"),
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let ssl_mode = get("DATABASE_SSL_MODE")
            .map(|v| {
                PgSslMode::from_str(&v).map_err(|e| ConfigError::Invalid {
                    key: "DATABASE_SSL_MODE",
                    reason: e.to_string(),
                })
            })
            .transpose()?;
        let create_database = parse_or(get("DATABASE_CREATE_IF_MISSING"), "DATABASE_CREATE_IF_MISSING", false)?;
        let cors_allow_origins = match get("CORS_ALLOW_ORIGIN") {
            Some(list) => parse_origins(&list)?,
            None => Vec::new(),
        };

        Ok(ServerConfig {
            database_url,
            bind_addr,
            port,
            max_connections,
            ssl_mode,
            create_database,
            cors_allow_origins,
        })
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let options = PgConnectOptions::from_str(&self.database_url).map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            reason: e.to_string(),
        })?;
        Ok(match self.ssl_mode {
            Some(mode) => options.ssl_mode(mode),
            None => options,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })
    }
}

fn parse_or<T>(raw: Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("'{}': {}", v, e),
        }),
    }
}

fn parse_origins(list: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    list.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| ConfigError::Invalid {
                key: "CORS_ALLOW_ORIGIN",
                reason: e.to_string(),
            })
        })
        .collect()
}
