//! Inventory persistence over a key-value store.
//!
//! Each record lives under the key `"<id>"` as JSON. Ids come from the
//! counter at [`COUNTER_KEY`], which is skipped whenever records are
//! enumerated. Searches are linear scans; the store is never asked to filter.
//!
//! Operations are individually atomic only as far as the backend makes them
//! so. `find` checks existence and then reads, and a concurrent delete in
//! between makes it report "not found".

use std::sync::Arc;

use crate::common::{InventoryError, InventoryResult};
use crate::domains::inventory::data::InventoryData;
use crate::domains::inventory::models::{AttributeValue, Inventory, InventoryAttribute};
use crate::kernel::BaseKeyValueStore;

/// Reserved key holding the last issued id
pub const COUNTER_KEY: &str = "index";

/// Domain-level CRUD and search over inventories
#[derive(Clone)]
pub struct InventoryRepository {
    store: Arc<dyn BaseKeyValueStore>,
}

impl InventoryRepository {
    pub fn new(store: Arc<dyn BaseKeyValueStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Persist `inventory`, assigning a fresh id when it has none.
    ///
    /// Saving with an existing id replaces the stored record. Saving with id 0
    /// always creates a new record.
    pub async fn save(&self, inventory: &mut Inventory) -> InventoryResult<()> {
        if inventory.name.is_empty() {
            return Err(InventoryError::validation("name", "attribute is not set"));
        }

        if !inventory.is_saved() {
            inventory.id = self.store.increment(COUNTER_KEY).await?;
        }

        let bytes = serde_json::to_vec(&inventory.serialize())?;
        self.store.set(&record_key(inventory.id), bytes).await?;

        tracing::debug!(id = inventory.id, "Inventory saved");
        Ok(())
    }

    /// Remove `inventory`; unknown ids are ignored
    pub async fn delete(&self, inventory: &Inventory) -> InventoryResult<()> {
        self.store.delete(&record_key(inventory.id)).await?;
        tracing::debug!(id = inventory.id, "Inventory deleted");
        Ok(())
    }

    /// Remove every inventory and reset id assignment to start at 1
    pub async fn remove_all(&self) -> InventoryResult<()> {
        tracing::warn!("Removing all inventories");
        self.store.flush_all().await?;
        Ok(())
    }

    // =========================================================================
    // Finders
    // =========================================================================

    pub async fn find(&self, id: i64) -> InventoryResult<Option<Inventory>> {
        let key = record_key(id);
        if !self.store.exists(&key).await? {
            return Ok(None);
        }

        match self.store.get(&key).await? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Every record with this id (at most one while ids are unique)
    pub async fn find_all_by_id(&self, id: i64) -> InventoryResult<Vec<Inventory>> {
        self.find_matching(|inventory| inventory.id == id).await
    }

    /// Every stored inventory, in the backend's enumeration order
    pub async fn all(&self) -> InventoryResult<Vec<Inventory>> {
        let mut results = Vec::new();

        for key in self.store.keys().await? {
            if key == COUNTER_KEY {
                continue;
            }

            // Deleted since the key listing
            if let Some(bytes) = self.store.get(&key).await? {
                results.push(decode(&bytes)?);
            }
        }

        Ok(results)
    }

    /// Every inventory satisfying `predicate`
    pub async fn find_matching<F>(&self, predicate: F) -> InventoryResult<Vec<Inventory>>
    where
        F: Fn(&Inventory) -> bool,
    {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|inventory| predicate(inventory))
            .collect())
    }

    /// Every inventory whose `attribute` equals `value`, ignoring case when
    /// both sides are text
    pub async fn find_by(
        &self,
        attribute: InventoryAttribute,
        value: impl Into<AttributeValue>,
    ) -> InventoryResult<Vec<Inventory>> {
        let value = value.into();
        tracing::info!("Processing {} query for {}", attribute, value);

        self.find_matching(|inventory| inventory.attribute(attribute).matches(&value))
            .await
    }

    pub async fn find_by_name(&self, name: &str) -> InventoryResult<Vec<Inventory>> {
        self.find_by(InventoryAttribute::Name, name).await
    }

    pub async fn find_by_status(&self, status: &str) -> InventoryResult<Vec<Inventory>> {
        self.find_by(InventoryAttribute::Status, status).await
    }

    pub async fn find_by_quantity(&self, quantity: i64) -> InventoryResult<Vec<Inventory>> {
        self.find_by(InventoryAttribute::Quantity, quantity).await
    }
}

fn record_key(id: i64) -> String {
    id.to_string()
}

fn decode(bytes: &[u8]) -> InventoryResult<Inventory> {
    let data: InventoryData = serde_json::from_slice(bytes)?;
    Ok(data.into())
}
