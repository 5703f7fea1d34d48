pub mod data;
pub mod models;
pub mod queries;
pub mod repository;

// Re-export commonly used types
pub use data::{InventoryCount, InventoryData, QuantitySum};
pub use models::{AttributeValue, Inventory, InventoryAttribute, InventorySchema};
pub use repository::{InventoryRepository, COUNTER_KEY};
