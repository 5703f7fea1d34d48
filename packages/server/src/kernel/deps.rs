//! Server dependencies (using traits for testability)
//!
//! This module provides the dependency container handed to the HTTP layer and
//! the admin CLI. The store is held behind `BaseKeyValueStore` so tests can
//! swap Redis for the in-memory backend.

use std::sync::Arc;

use crate::common::StoreError;
use crate::config::{Config, StoreBackend};
use crate::domains::inventory::{InventoryRepository, InventorySchema};
use crate::kernel::{redis_store, BaseKeyValueStore, MemoryStore};

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies shared by every request
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseKeyValueStore>,
    pub repository: Arc<InventoryRepository>,
    pub schema: Arc<InventorySchema>,
}

impl ServerDeps {
    pub fn new(store: Arc<dyn BaseKeyValueStore>, schema: InventorySchema) -> Self {
        let repository = Arc::new(InventoryRepository::new(store.clone()));
        Self {
            store,
            repository,
            schema: Arc::new(schema),
        }
    }

    /// Dependencies over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), InventorySchema::default())
    }

    /// Build dependencies from configuration, connecting to Redis when
    /// configured. A Redis backend that cannot be reached is an error.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let store: Arc<dyn BaseKeyValueStore> = match config.store_backend {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory inventory store");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::Redis => Arc::new(redis_store::connect(config).await?),
        };

        let schema = InventorySchema {
            allowed_statuses: config.allowed_statuses.clone(),
        };

        Ok(Self::new(store, schema))
    }
}
