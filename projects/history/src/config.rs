use std::net::SocketAddr;

use interfaces_instagram_media::index::DEFAULT_BASE_URL;
use thiserror::Error;
use utils_trace::{LogFormat, ParseLogFormatError};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_POOL_SIZE: u32 = 5;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub api_token: String,
    pub feed_base_url: String,
    pub bind_addr: SocketAddr,
    pub pool_size: u32,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {name}")]
    Missing { name: &'static str },

    #[error("Invalid {name}: {value}")]
    InvalidBindAddr {
        name: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Invalid {name}: {value}")]
    InvalidPoolSize {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("{name} must be at least 1")]
    EmptyPool { name: &'static str },

    #[error("Invalid {name}: {source}")]
    InvalidLogFormat {
        name: &'static str,
        #[source]
        source: ParseLogFormatError,
    },
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing { name });

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value.parse().map_err(|source| ConfigError::InvalidBindAddr {
                name: "BIND_ADDR",
                value,
                source,
            })?,
            None => SocketAddr::from(DEFAULT_BIND_ADDR),
        };

        let pool_size = match get("DATABASE_POOL_SIZE") {
            Some(value) => value.parse().map_err(|source| ConfigError::InvalidPoolSize {
                name: "DATABASE_POOL_SIZE",
                value,
                source,
            })?,
            None => DEFAULT_POOL_SIZE,
        };
        if pool_size == 0 {
            return Err(ConfigError::EmptyPool {
                name: "DATABASE_POOL_SIZE",
            });
        }

        let log_format = match get("LOG_FORMAT") {
            Some(value) => value.parse().map_err(|source| ConfigError::InvalidLogFormat {
                name: "LOG_FORMAT",
                source,
            })?,
            None => LogFormat::default(),
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            api_token: require("API_TOKEN")?,
            feed_base_url: get("MEDIA_FEED_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            bind_addr,
            pool_size,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format,
        })
    }
}
