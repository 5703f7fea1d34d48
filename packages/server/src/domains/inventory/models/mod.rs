pub mod inventory;
pub mod schema;

pub use inventory::{AttributeValue, Inventory, InventoryAttribute, UNASSIGNED_ID};
pub use schema::InventorySchema;
