//! Redis-backed key-value store.
//!
//! Atomicity of `increment` comes from Redis `INCR`; there is no process-local
//! locking. Each call is a single round trip over a shared multiplexed
//! connection and failures surface immediately, without retries.
//!
//! `connect` locates a Redis server by probing, in order:
//!   1. explicit configuration (`REDIS_URL`, else `VCAP_SERVICES` credentials)
//!   2. Redis on localhost (`127.0.0.1:6379`)
//!   3. a host named `redis` (e.g. a linked Docker container)

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError};
use serde_json::Value;

use super::traits::{BaseKeyValueStore, StoreResult};
use crate::common::StoreError;
use crate::config::Config;

pub const DEFAULT_REDIS_PORT: u16 = 6379;
pub const LOCALHOST_REDIS_HOST: &str = "127.0.0.1";
pub const FALLBACK_REDIS_HOST: &str = "redis";

/// A candidate Redis server to probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisEndpoint {
    /// Full connection URL (may contain a password)
    pub url: String,
    /// Log-safe description of the endpoint
    pub label: String,
}

impl RedisEndpoint {
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let label = redact_url(&url);
        Self { url, label }
    }

    pub fn from_parts(host: &str, port: u16, password: Option<&str>) -> Self {
        let url = match password.filter(|p| !p.is_empty()) {
            Some(password) => format!(
                "redis://:{}@{}:{}/",
                urlencoding::encode(password),
                host,
                port
            ),
            None => format!("redis://{}:{}/", host, port),
        };

        Self {
            url,
            label: format!("{}:{}", host, port),
        }
    }
}

/// Strip credentials from a redis URL for logging
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}***{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}

/// Read Redis credentials from a Cloud Foundry `VCAP_SERVICES` document
/// (`rediscloud[0].credentials.{hostname, port, password}`).
pub fn endpoint_from_vcap(vcap_services: &str) -> StoreResult<RedisEndpoint> {
    let services: Value = serde_json::from_str(vcap_services)
        .map_err(|e| StoreError::Connection(format!("Invalid VCAP_SERVICES: {}", e)))?;

    let credentials = services
        .get("rediscloud")
        .and_then(|s| s.get(0))
        .and_then(|s| s.get("credentials"))
        .ok_or_else(|| {
            StoreError::Connection("VCAP_SERVICES has no rediscloud credentials".to_string())
        })?;

    let hostname = credentials
        .get("hostname")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            StoreError::Connection("rediscloud credentials have no hostname".to_string())
        })?;

    // Service brokers publish the port as either a number or a string
    let port = match credentials.get("port") {
        Some(Value::Number(n)) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
        Some(Value::String(s)) => s.parse::<u16>().ok(),
        None => Some(DEFAULT_REDIS_PORT),
        _ => None,
    }
    .ok_or_else(|| StoreError::Connection("rediscloud credentials have an invalid port".to_string()))?;

    let password = credentials.get("password").and_then(Value::as_str);

    Ok(RedisEndpoint::from_parts(hostname, port, password))
}

/// Endpoints to probe, in order
pub fn candidate_endpoints(config: &Config) -> StoreResult<Vec<RedisEndpoint>> {
    let mut endpoints = Vec::with_capacity(3);

    if let Some(url) = &config.redis_url {
        endpoints.push(RedisEndpoint::from_url(url.clone()));
    } else if let Some(vcap) = &config.vcap_services {
        tracing::info!("Using VCAP_SERVICES...");
        endpoints.push(endpoint_from_vcap(vcap)?);
    }

    endpoints.push(RedisEndpoint::from_parts(
        LOCALHOST_REDIS_HOST,
        DEFAULT_REDIS_PORT,
        None,
    ));
    endpoints.push(RedisEndpoint::from_parts(
        FALLBACK_REDIS_HOST,
        DEFAULT_REDIS_PORT,
        None,
    ));

    endpoints.dedup();
    Ok(endpoints)
}

/// Probe each candidate endpoint and return a store for the first that
/// answers PING.
pub async fn connect(config: &Config) -> StoreResult<RedisStore> {
    for endpoint in candidate_endpoints(config)? {
        tracing::info!(endpoint = %endpoint.label, "Testing connection to Redis");
        match RedisStore::open(&endpoint, config.redis_probe_timeout).await {
            Ok(store) => {
                tracing::info!(endpoint = store.endpoint(), "Connection established");
                return Ok(store);
            }
            Err(e) => {
                tracing::info!(endpoint = %endpoint.label, error = %e, "Connection error");
            }
        }
    }

    tracing::error!("*** FATAL ERROR: Could not connect to the Redis Service");
    Err(StoreError::Connection(
        "Could not connect to the Redis Service".to_string(),
    ))
}

fn map_redis_error(e: RedisError) -> StoreError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout()
    {
        StoreError::Connection(e.to_string())
    } else {
        StoreError::Backend(e.to_string())
    }
}

/// Key-value store over a Redis connection
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    endpoint: String,
}

impl RedisStore {
    /// Connect to `endpoint` and verify it with PING, giving up after
    /// `timeout`.
    pub async fn open(endpoint: &RedisEndpoint, timeout: Duration) -> StoreResult<Self> {
        let probe = async {
            let client = redis::Client::open(endpoint.url.as_str()).map_err(map_redis_error)?;
            let mut connection = client
                .get_multiplexed_async_connection()
                .await
                .map_err(map_redis_error)?;
            let _: String = redis::cmd("PING")
                .query_async(&mut connection)
                .await
                .map_err(map_redis_error)?;
            Ok::<_, StoreError>(connection)
        };

        let connection = tokio::time::timeout(timeout, probe)
            .await
            .map_err(|_| {
                StoreError::Connection(format!(
                    "Timed out after {:?} connecting to {}",
                    timeout, endpoint.label
                ))
            })??;

        Ok(Self {
            connection,
            endpoint: endpoint.label.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn conn(&self) -> MultiplexedConnection {
        self.connection.clone()
    }
}

#[async_trait]
impl BaseKeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut con = self.conn();
        let value: Option<Vec<u8>> = con.get(key).await.map_err(map_redis_error)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut con = self.conn();
        let _: () = con.set(key, value).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut con = self.conn();
        let _: () = con.del(key).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut con = self.conn();
        let found: bool = con.exists(key).await.map_err(map_redis_error)?;
        Ok(found)
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let mut con = self.conn();
        let keys: Vec<String> = con.keys("*").await.map_err(map_redis_error)?;
        Ok(keys)
    }

    async fn increment(&self, key: &str) -> StoreResult<i64> {
        let mut con = self.conn();
        let next: i64 = con.incr(key, 1).await.map_err(map_redis_error)?;
        Ok(next)
    }

    async fn flush_all(&self) -> StoreResult<()> {
        let mut con = self.conn();
        let _: () = redis::cmd("FLUSHALL")
            .query_async(&mut con)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut con = self.conn();
        let _: String = redis::cmd("PING")
            .query_async(&mut con)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
