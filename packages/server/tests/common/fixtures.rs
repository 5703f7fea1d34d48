//! Test fixtures for creating test data.
//!
//! These fixtures go through the repository, the same way the HTTP layer does.

use anyhow::Result;
use inventory_core::domains::inventory::{Inventory, InventoryRepository};

/// Save a new inventory and return it with its assigned id
pub async fn create_test_inventory(
    repo: &InventoryRepository,
    name: &str,
    quantity: i64,
    status: &str,
) -> Result<Inventory> {
    let mut inventory = Inventory::new(name, quantity, status);
    repo.save(&mut inventory).await?;
    Ok(inventory)
}

/// The two records every server test starts from:
/// shampoo (id 1, 2 new) and conditioner (id 2, 5 new)
pub async fn seed_shampoo_and_conditioner(
    repo: &InventoryRepository,
) -> Result<(Inventory, Inventory)> {
    let shampoo = create_test_inventory(repo, "shampoo", 2, "new").await?;
    let conditioner = create_test_inventory(repo, "conditioner", 5, "new").await?;
    Ok((shampoo, conditioner))
}

/// Sort by id so assertions do not depend on backend enumeration order
pub fn sorted_by_id(mut inventories: Vec<Inventory>) -> Vec<Inventory> {
    inventories.sort_by_key(|inventory| inventory.id);
    inventories
}
