//! Server configuration read from environment variables.
//!
//! - RECIPE_STORE: "postgres" (default) | "memory"
//! - DATABASE_URL: Postgres connection string (required for "postgres")
//! - BIND_ADDR: listen address (default: 0.0.0.0:3000)

use std::env;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set when RECIPE_STORE=postgres")]
    MissingDatabaseUrl,

    #[error("Unknown RECIPE_STORE: {0}")]
    UnknownStore(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = match lookup("RECIPE_STORE").as_deref().unwrap_or("postgres") {
            "postgres" => StoreConfig::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
            },
            "memory" => StoreConfig::Memory,
            other => return Err(ConfigError::UnknownStore(other.to_string())),
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        Ok(Self { store, bind_addr })
    }
}
