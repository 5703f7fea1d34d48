//! Test harness for integration testing.
//!
//! `TestHarness` runs the full router over a fresh in-memory store per test.
//! `RedisHarness` uses one Redis container shared across the whole test run
//! (started on first use) and serializes tests that touch it, since they all
//! flush the same server.

use anyhow::{Context, Result};
use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use inventory_core::domains::inventory::{InventoryRepository, InventorySchema};
use inventory_core::kernel::{MemoryStore, RedisEndpoint, RedisStore, ServerDeps};
use inventory_core::server::build_app;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::redis::Redis;
use tokio::sync::{Mutex, MutexGuard, OnceCell};

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// In-memory harness
// =============================================================================

/// Router and repository over a fresh in-memory store.
///
/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &mut TestHarness) {
///     let response = ctx.get("/inventories").await;
///     // ... test code
/// }
/// ```
pub struct TestHarness {
    pub deps: ServerDeps,
    pub store: MemoryStore,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new()
    }

    async fn teardown(self) {
        // Store is dropped with the harness
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_schema(InventorySchema::default())
    }

    pub fn with_schema(schema: InventorySchema) -> Self {
        init_tracing();
        let store = MemoryStore::new();
        let deps = ServerDeps::new(Arc::new(store.clone()), schema);
        Self { deps, store }
    }

    pub fn repository(&self) -> &InventoryRepository {
        &self.deps.repository
    }

    pub fn app(&self) -> Router {
        build_app(self.deps.clone())
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        send(self.app(), Method::GET, uri, None, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        send(self.app(), Method::DELETE, uri, None, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        send(
            self.app(),
            Method::POST,
            uri,
            Some("application/json"),
            Some(body.to_string()),
        )
        .await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> TestResponse {
        send(
            self.app(),
            Method::PUT,
            uri,
            Some("application/json"),
            Some(body.to_string()),
        )
        .await
    }

    /// Request with an explicit (possibly wrong) content type
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> TestResponse {
        send(self.app(), method, uri, content_type, Some(body.to_string())).await
    }
}

// =============================================================================
// Responses
// =============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response body is not the expected JSON ({}): {}",
                e,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: Option<String>,
) -> TestResponse {
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }

    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .expect("request should build");

    let response = app.oneshot(request).await.expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

// =============================================================================
// Redis harness
// =============================================================================

/// Shared Redis container that persists across all tests.
struct SharedRedis {
    url: String,
    // Keep the container alive for the entire test run
    _redis: ContainerAsync<Redis>,
}

static SHARED_REDIS: OnceCell<SharedRedis> = OnceCell::const_new();
static REDIS_LOCK: Mutex<()> = Mutex::const_new(());

impl SharedRedis {
    async fn init() -> Result<Self> {
        init_tracing();

        let redis = Redis::default()
            .start()
            .await
            .context("Failed to start Redis container")?;

        let host = redis.get_host().await?;
        let port = redis.get_host_port_ipv4(6379).await?;

        Ok(Self {
            url: format!("redis://{}:{}", host, port),
            _redis: redis,
        })
    }

    async fn get() -> &'static Self {
        SHARED_REDIS
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared Redis container")
            })
            .await
    }
}

/// Redis-backed store for one test, emptied on creation.
pub struct RedisHarness {
    pub url: String,
    pub store: RedisStore,
    pub repository: InventoryRepository,
    _guard: MutexGuard<'static, ()>,
}

impl RedisHarness {
    pub async fn new() -> Result<Self> {
        let guard = REDIS_LOCK.lock().await;
        let infra = SharedRedis::get().await;

        let store = RedisStore::open(
            &RedisEndpoint::from_url(infra.url.clone()),
            Duration::from_secs(5),
        )
        .await
        .context("Failed to connect to test Redis")?;

        let repository = InventoryRepository::new(Arc::new(store.clone()));
        repository.remove_all().await?;

        Ok(Self {
            url: infra.url.clone(),
            store,
            repository,
            _guard: guard,
        })
    }
}
