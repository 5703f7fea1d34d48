//! In-process key-value store.
//!
//! Every operation runs under one async mutex, so counter increments and
//! structural mutations are serialized across concurrent requests. Counters
//! are kept in the same map as decimal strings, the way Redis stores them.
//! Nothing survives the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::traits::{BaseKeyValueStore, StoreResult};
use crate::common::StoreError;

/// Thread-safe, cloneable in-memory store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored (counters included)
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl BaseKeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        entries.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let entries = self.entries.lock().await;
        Ok(entries.contains_key(key))
    }

    async fn keys(&self) -> StoreResult<Vec<String>> {
        let entries = self.entries.lock().await;
        Ok(entries.keys().cloned().collect())
    }

    async fn increment(&self, key: &str) -> StoreResult<i64> {
        let mut entries = self.entries.lock().await;

        let current = match entries.get(key) {
            Some(raw) => std::str::from_utf8(raw)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| {
                    StoreError::Backend(format!(
                        "value at '{}' is not an integer or out of range",
                        key
                    ))
                })?,
            None => 0,
        };

        let next = current.checked_add(1).ok_or_else(|| {
            StoreError::Backend(format!("increment of '{}' would overflow", key))
        })?;

        entries.insert(key.to_string(), next.to_string().into_bytes());
        Ok(next)
    }

    async fn flush_all(&self) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        entries.clear();
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
