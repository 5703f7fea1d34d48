// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Inventory semantics (id assignment, attribute search) live in the repository,
// which only sees a store through this narrow interface.
//
// Naming convention: Base* for trait names (e.g., BaseKeyValueStore)

use async_trait::async_trait;

use crate::common::StoreError;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// =============================================================================
// Key-Value Store Trait (Infrastructure - persistence backend)
// =============================================================================

#[async_trait]
pub trait BaseKeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn delete(&self, key: &str) -> StoreResult<()>;

    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Every key currently stored, counters included
    async fn keys(&self) -> StoreResult<Vec<String>>;

    /// Atomically increment the integer counter at `key` and return the new
    /// value. A missing counter starts at 0, so the first call returns 1.
    async fn increment(&self, key: &str) -> StoreResult<i64>;

    /// Remove every key, counters included
    async fn flush_all(&self) -> StoreResult<()>;

    /// Round trip to the backend (connection probes, health checks)
    async fn ping(&self) -> StoreResult<()>;

    /// Short backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
