use serde::{Deserialize, Serialize};

use crate::domains::inventory::models::Inventory;

/// Inventory transport/storage form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryData {
    /// Unique id assigned by the service
    pub id: i64,

    pub name: String,

    /// Amount on hand (not range checked)
    pub quantity: i64,

    /// Condition of the stock (e.g., 'new', 'openBox', 'used')
    pub status: String,
}

impl From<&Inventory> for InventoryData {
    fn from(inventory: &Inventory) -> Self {
        Self {
            id: inventory.id,
            name: inventory.name.clone(),
            quantity: inventory.quantity,
            status: inventory.status.clone(),
        }
    }
}

impl From<Inventory> for InventoryData {
    fn from(inventory: Inventory) -> Self {
        Self {
            id: inventory.id,
            name: inventory.name,
            quantity: inventory.quantity,
            status: inventory.status,
        }
    }
}

/// Records matching a name together with their total quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCount {
    pub records: Vec<InventoryData>,
    pub name: String,
    pub count: i64,
}

/// Total quantity across every record sharing an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantitySum {
    pub quantity_sum: i64,
}
