//! Inventory REST endpoints.
//!
//! Paths:
//!   GET    /inventories              all inventories, or filtered by quantity/status/name
//!   GET    /inventories/{id}         one inventory
//!   POST   /inventories              create an inventory
//!   PUT    /inventories/{id}         update an inventory
//!   DELETE /inventories/{id}         delete an inventory
//!   GET    /inventories/count        total quantity for a name
//!   GET    /inventories/count/{id}   total quantity for an id
//!   GET    /inventories/query        inventories matching name and status
//!   DELETE /inventories/reset        remove everything (testing only)

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::{header::LOCATION, StatusCode},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::common::{InventoryError, InventoryResult};
use crate::domains::inventory::queries;
use crate::domains::inventory::{Inventory, InventoryCount, InventoryData, QuantitySum};
use crate::kernel::ServerDeps;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub status: Option<String>,
    pub quantity: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CountParams {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub name: Option<String>,
    pub status: Option<String>,
}

/// Non-numeric ids cannot name an inventory
fn parse_id(raw: &str) -> InventoryResult<i64> {
    raw.parse::<i64>().map_err(|_| not_found(raw))
}

fn not_found(id: impl std::fmt::Display) -> InventoryError {
    InventoryError::NotFound(format!("Inventory with id '{}' was not found.", id))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_body(body: &Bytes) -> InventoryResult<Value> {
    serde_json::from_slice(body)
        .map_err(|e| InventoryError::validation("body", format!("invalid JSON: {}", e)))
}

fn serialize_all(inventories: Vec<Inventory>) -> Vec<InventoryData> {
    inventories.into_iter().map(InventoryData::from).collect()
}

// =============================================================================
// /inventories
// =============================================================================

/// List inventories. Filters apply in order quantity, status, name; only the
/// first one present is used.
pub async fn list_inventories(
    Extension(deps): Extension<ServerDeps>,
    Query(params): Query<ListParams>,
) -> InventoryResult<Json<Vec<InventoryData>>> {
    tracing::info!("Request to list Inventories...");
    let repo = &deps.repository;

    let inventories = if let Some(quantity) = non_empty(params.quantity) {
        let quantity = quantity
            .parse::<i64>()
            .map_err(|_| InventoryError::validation("quantity", "must be of integer type"))?;
        repo.find_by_quantity(quantity).await?
    } else if let Some(status) = non_empty(params.status) {
        repo.find_by_status(&status).await?
    } else if let Some(name) = non_empty(params.name) {
        repo.find_by_name(&name).await?
    } else {
        repo.all().await?
    };

    tracing::info!("[{}] Inventories returned", inventories.len());
    Ok(Json(serialize_all(inventories)))
}

pub async fn create_inventory(
    Extension(deps): Extension<ServerDeps>,
    body: Bytes,
) -> InventoryResult<(StatusCode, [(axum::http::HeaderName, String); 1], Json<InventoryData>)> {
    tracing::info!("Request to Create a Inventory");
    let payload = parse_body(&body)?;

    let mut inventory = deps.schema.validate(&payload)?;
    deps.repository.save(&mut inventory).await?;
    tracing::info!("Inventory with new id [{}] saved!", inventory.id);

    let location = format!("/inventories/{}", inventory.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(inventory.serialize()),
    ))
}

// =============================================================================
// /inventories/{id}
// =============================================================================

pub async fn get_inventory(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> InventoryResult<Json<InventoryData>> {
    tracing::info!("Request to Retrieve an inventory with id [{}]", id);
    let id = parse_id(&id)?;

    let inventory = deps
        .repository
        .find(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(inventory.serialize()))
}

pub async fn update_inventory(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
    body: Bytes,
) -> InventoryResult<Json<InventoryData>> {
    tracing::info!("Request to Update a inventory with id [{}]", id);
    let id = parse_id(&id)?;

    if deps.repository.find(id).await?.is_none() {
        return Err(not_found(id));
    }

    let payload = parse_body(&body)?;
    let mut inventory = deps.schema.validate(&payload)?.with_id(id);
    deps.repository.save(&mut inventory).await?;

    Ok(Json(inventory.serialize()))
}

/// Always 204, whether or not the inventory existed
pub async fn delete_inventory(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> InventoryResult<StatusCode> {
    tracing::info!("Request to Delete a inventory with id [{}]", id);

    if let Ok(id) = id.parse::<i64>() {
        if let Some(inventory) = deps.repository.find(id).await? {
            deps.repository.delete(&inventory).await?;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// /inventories/count, /inventories/query, /inventories/reset
// =============================================================================

pub async fn count_inventories(
    Extension(deps): Extension<ServerDeps>,
    Query(params): Query<CountParams>,
) -> InventoryResult<Json<InventoryCount>> {
    tracing::info!("Request to Count an Inventory");
    let name = non_empty(params.name)
        .ok_or_else(|| InventoryError::validation("name", "required field"))?;

    let count = queries::count_by_name(&deps.repository, &name).await?;
    Ok(Json(count))
}

pub async fn count_inventory_by_id(
    Extension(deps): Extension<ServerDeps>,
    Path(id): Path<String>,
) -> InventoryResult<Json<QuantitySum>> {
    tracing::info!("Request to Count inventory records with id [{}]", id);
    let id = parse_id(&id)?;

    let quantity_sum = queries::quantity_sum_for_id(&deps.repository, id).await?;
    Ok(Json(QuantitySum { quantity_sum }))
}

pub async fn query_inventories(
    Extension(deps): Extension<ServerDeps>,
    Query(params): Query<QueryParams>,
) -> InventoryResult<Json<Vec<InventoryData>>> {
    tracing::info!("Request to Query an Inventory");
    let name = params.name.unwrap_or_default();
    let status = params.status.unwrap_or_default();

    let results = queries::query_by_name_and_status(&deps.repository, &name, &status).await?;
    Ok(Json(serialize_all(results)))
}

/// Remove every inventory and reset ids (for testing only)
pub async fn reset_inventories(
    Extension(deps): Extension<ServerDeps>,
) -> InventoryResult<StatusCode> {
    deps.repository.remove_all().await?;
    Ok(StatusCode::NO_CONTENT)
}
