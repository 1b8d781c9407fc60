//! Service configuration from environment variables.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("REVIEW_STORE_PATH is set but empty")]
    EmptyStorePath,

    #[error("unknown REVIEW_POLICY: {0}")]
    UnknownPolicy(String),
}

/// Where review state is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub policy: String,
    pub log_filter: String,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Env vars:
    /// - HOST: bind address (default "0.0.0.0")
    /// - PORT: bind port (default 3000)
    /// - REVIEW_STORE_PATH: JSON state file; in-memory store when unset
    /// - REVIEW_POLICY: scheduling policy name (default "graded")
    /// - RUST_LOG: tracing filter (default "info")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => 3000,
        };

        let store = match lookup("REVIEW_STORE_PATH") {
            Some(path) if path.trim().is_empty() => return Err(ConfigError::EmptyStorePath),
            Some(path) => StoreBackend::JsonFile(PathBuf::from(path)),
            None => StoreBackend::Memory,
        };

        let policy = lookup("REVIEW_POLICY").unwrap_or_else(|| "graded".to_string());
        if review_core::get_policy(&policy).is_none() {
            return Err(ConfigError::UnknownPolicy(policy));
        }

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            host,
            port,
            store,
            policy,
            log_filter,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
