//! Server configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `MONGO_URI` | required for the `mongo` store |
//! | `MONGO_DATABASE` | database named in `MONGO_URI`, else `recipe-app` |
//! | `PORT` | `5001` |
//! | `BIND_HOST` | `0.0.0.0` |
//! | `CORS_ORIGINS` | [`DEFAULT_CORS_ORIGINS`] |
//! | `RECIPE_STORE` | `mongo` |

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

pub const DEFAULT_CORS_ORIGINS: [&str; 5] = [
    "https://my-recipe-app-psi.vercel.app",
    "http://localhost:19006",
    "http://localhost:8081",
    "http://10.0.2.2:5001",
    "http://192.168.1.100:5001",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Value of `RECIPE_STORE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreKind::Mongo),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown store '{other}', expected 'mongo' or 'memory'")),
        }
    }
}

/// The store the server runs against, with its connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo {
        uri: String,
        /// Overrides the database named in `uri`.
        database: Option<String>,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub store: StoreBackend,
    pub bind_host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_vars(env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let kind = match get("RECIPE_STORE") {
            Some(value) => value
                .parse()
                .map_err(|message| ConfigError::Invalid { key: "RECIPE_STORE", message })?,
            None => StoreKind::Mongo,
        };

        let store = match kind {
            StoreKind::Mongo => StoreBackend::Mongo {
                uri: get("MONGO_URI").ok_or(ConfigError::Missing("MONGO_URI"))?,
                database: get("MONGO_DATABASE"),
            },
            StoreKind::Memory => StoreBackend::Memory,
        };

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: "PORT",
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let cors_origins = match get("CORS_ORIGINS") {
            Some(value) => value
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|origin| origin.to_string()).collect(),
        };

        Ok(Self {
            store,
            bind_host: get("BIND_HOST").unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            port,
            cors_origins,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
