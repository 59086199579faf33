//! Startup configuration read from the environment.

use std::time::Duration;

use cinevibe_metadata::cache::CachePolicy;
use cinevibe_metadata::omdb::DEFAULT_BASE_URL;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub bind_addr: String,
    pub omdb_api_key: Option<String>,
    pub omdb_url: String,
    pub cache: CachePolicy,
    /// Allowed CORS origins; empty allows any.
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: "cinevibe.db".to_string(),
            bind_addr: "0.0.0.0:8888".to_string(),
            omdb_api_key: None,
            omdb_url: DEFAULT_BASE_URL.to_string(),
            cache: CachePolicy::default(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup; unset or blank values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("CINEVIBE_DB") {
            config.db_path = v;
        }
        if let Some(v) = get("CINEVIBE_BIND") {
            config.bind_addr = v;
        }
        config.omdb_api_key = get("OMDB_API_KEY");
        if let Some(v) = get("CINEVIBE_OMDB_URL") {
            config.omdb_url = v;
        }
        if let Some(v) = get("CINEVIBE_CACHE_CAPACITY") {
            config.cache.capacity = parse_number("CINEVIBE_CACHE_CAPACITY", &v)? as usize;
        }
        if let Some(v) = get("CINEVIBE_CACHE_TTL_SECS") {
            config.cache.ttl = Duration::from_secs(parse_number("CINEVIBE_CACHE_TTL_SECS", &v)?);
        }
        if let Some(v) = get("CORS_ALLOW_ORIGIN") {
            config.cors_origins = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }
}

fn parse_number(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
}
