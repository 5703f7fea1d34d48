pub mod inventory;

pub use inventory::{InventoryCount, InventoryData, QuantitySum};
