use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Which key-value backend the service stores inventories in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(anyhow::anyhow!("Invalid store backend: {}", other)),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store_backend: StoreBackend,
    /// Explicit Redis connection URL; takes precedence over VCAP_SERVICES
    pub redis_url: Option<String>,
    /// Cloud Foundry service bindings (JSON)
    pub vcap_services: Option<String>,
    pub redis_probe_timeout: Duration,
    /// When set, inventory statuses must be one of these values
    pub allowed_statuses: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            store_backend: StoreBackend::Redis,
            redis_url: None,
            vcap_services: None,
            redis_probe_timeout: Duration::from_millis(2000),
            allowed_statuses: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            store_backend: match env::var("INVENTORY_STORE") {
                Ok(value) => value
                    .parse()
                    .context("INVENTORY_STORE must be 'memory' or 'redis'")?,
                Err(_) => defaults.store_backend,
            },
            redis_url: non_empty_var("REDIS_URL"),
            vcap_services: non_empty_var("VCAP_SERVICES"),
            redis_probe_timeout: match env::var("REDIS_PROBE_TIMEOUT_MS") {
                Ok(value) => Duration::from_millis(
                    value
                        .parse()
                        .context("REDIS_PROBE_TIMEOUT_MS must be a number of milliseconds")?,
                ),
                Err(_) => defaults.redis_probe_timeout,
            },
            allowed_statuses: match non_empty_var("INVENTORY_ALLOWED_STATUSES") {
                Some(value) => Some(parse_status_list(&value)?),
                None => None,
            },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Parse a comma-separated status list, e.g. "new,openBox,used"
pub fn parse_status_list(value: &str) -> Result<Vec<String>> {
    let statuses: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if statuses.is_empty() {
        bail!("INVENTORY_ALLOWED_STATUSES must list at least one status");
    }

    Ok(statuses)
}
