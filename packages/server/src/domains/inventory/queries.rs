// Multi-field queries and quantity aggregation over the repository

use crate::common::{InventoryError, InventoryResult};
use crate::domains::inventory::data::{InventoryCount, InventoryData};
use crate::domains::inventory::models::Inventory;
use crate::domains::inventory::repository::InventoryRepository;

/// Total quantity across `records`; 0 when empty.
///
/// Fails with `Overflow` when the total does not fit in an `i64`.
pub fn sum_quantity(records: &[Inventory]) -> InventoryResult<i64> {
    records.iter().try_fold(0i64, |total, record| {
        total.checked_add(record.quantity).ok_or_else(|| {
            InventoryError::Overflow(format!(
                "Total quantity of {} inventories is out of range",
                records.len()
            ))
        })
    })
}

/// Records matching both `name` and `status` (case-insensitive).
///
/// A record is included only when its serialized form appears, field for
/// field, in both the by-name and by-status results. Fails with `NotFound`
/// when either side is empty.
pub async fn query_by_name_and_status(
    repo: &InventoryRepository,
    name: &str,
    status: &str,
) -> InventoryResult<Vec<Inventory>> {
    let by_name = repo.find_by_name(name).await?;
    let by_status = repo.find_by_status(status).await?;

    if by_name.is_empty() || by_status.is_empty() {
        return Err(InventoryError::NotFound(format!(
            "Query Inventory with name '{}' and status '{}' was not found.",
            name, status
        )));
    }

    let status_rows: Vec<InventoryData> = by_status.iter().map(Inventory::serialize).collect();

    let results: Vec<Inventory> = by_name
        .into_iter()
        .filter(|inventory| status_rows.contains(&inventory.serialize()))
        .collect();

    tracing::info!("[{}] Inventories returned", results.len());
    Ok(results)
}

/// Records named `name` (case-insensitive) and their total quantity
pub async fn count_by_name(repo: &InventoryRepository, name: &str) -> InventoryResult<InventoryCount> {
    let records = repo.find_by_name(name).await?;
    let count = sum_quantity(&records)?;

    tracing::info!("Inventory with name [{}] has been counted!", name);
    Ok(InventoryCount {
        records: records.into_iter().map(InventoryData::from).collect(),
        name: name.to_string(),
        count,
    })
}

/// Total quantity across every record with this id
pub async fn quantity_sum_for_id(repo: &InventoryRepository, id: i64) -> InventoryResult<i64> {
    let records = repo.find_all_by_id(id).await?;
    if records.is_empty() {
        return Err(InventoryError::NotFound(format!(
            "Inventory with id '{}' was not found.",
            id
        )));
    }

    sum_quantity(&records)
}
