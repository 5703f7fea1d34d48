// Business domains
pub mod inventory;
