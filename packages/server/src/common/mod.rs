// Common types shared across the application

pub mod errors;

pub use errors::{FieldError, InventoryError, InventoryResult, StoreError, ValidationErrors};
