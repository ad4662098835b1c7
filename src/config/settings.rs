//! Process settings read from the environment (after an optional `.env`).

use crate::error::ConfigError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 5001;

#[derive(Clone, Debug)]
pub struct Settings {
    /// PostgreSQL URL. Present selects the durable store.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub body_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: None,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_connections: 5,
            connect_timeout: Duration::from_secs(10),
            body_limit: 64 * 1024,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank keys take defaults;
    /// set but unparseable keys are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Settings::default();
        Ok(Settings {
            database_url: get("DATABASE_URL"),
            host: parse_or("HOST", get("HOST"), defaults.host)?,
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            connect_timeout: parse_or(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                get("DATABASE_CONNECT_TIMEOUT_SECS"),
                defaults.connect_timeout.as_secs(),
            )
            .map(Duration::from_secs)?,
            body_limit: parse_or("REQUEST_BODY_LIMIT", get("REQUEST_BODY_LIMIT"), defaults.body_limit)?,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
