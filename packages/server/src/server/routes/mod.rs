// HTTP routes
pub mod health;
pub mod inventories;

pub use health::*;
pub use inventories::*;
