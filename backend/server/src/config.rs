use std::{env, fmt, fmt::Display, fs::read_to_string, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{debug, info};

const DEFAULT_PORT: &str = "8080";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_STORE: &str = "redis";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend {other:?}, expected redis or memory")),
        }
    }
}

impl Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Redis => write!(f, "redis"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub store_backend: StoreBackend,
    pub catalog_seed: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let redis_url: String = try_load("REDIS_URL", DEFAULT_REDIS_URL)?;

        Ok(Self {
            port: try_load("RUST_PORT", DEFAULT_PORT)?,
            redis_url: with_password(&redis_url, read_secret("REDIS_PASSWORD").as_deref()),
            store_backend: try_load("STORE_BACKEND", DEFAULT_STORE)?,
            catalog_seed: env::var("CATALOG_SEED").ok().map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            store_backend: StoreBackend::Memory,
            catalog_seed: None,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            debug!("No {secret_name} secret at {path}: {e}");
        })
        .ok()
        .filter(|s| !s.is_empty())
}

/// Splices a password into a redis URL that does not already carry credentials.
fn with_password(redis_url: &str, password: Option<&str>) -> String {
    let Some(password) = password else {
        return redis_url.to_string();
    };

    match redis_url.split_once("://") {
        Some((scheme, rest)) if !rest.contains('@') => format!("{scheme}://:{password}@{rest}"),
        _ => redis_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("redis".parse::<StoreBackend>(), Ok(StoreBackend::Redis));
        assert_eq!(" Memory ".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_with_password() {
        assert_eq!(
            with_password("redis://cache:6379", Some("hunter2")),
            "redis://:hunter2@cache:6379"
        );
        assert_eq!(
            with_password("redis://user:pw@cache:6379", Some("hunter2")),
            "redis://user:pw@cache:6379"
        );
        assert_eq!(with_password("redis://cache:6379", None), "redis://cache:6379");
    }
}
