//! Administrative CLI for the inventory store
//!
//! Resets, seeds and lists inventories directly against the configured store
//! (same environment variables as the server). Outputs JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inventory_core::config::{Config, StoreBackend};
use inventory_core::domains::inventory::{InventoryData, InventoryRepository};
use inventory_core::kernel::ServerDeps;
use serde::Serialize;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "inventory_admin")]
#[command(about = "Inventory store administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove every inventory and reset id assignment
    Reset,

    /// List every inventory
    List,

    /// Save each inventory in a JSON array file as a new record
    Load { file: PathBuf },
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inventories: Option<Vec<InventoryData>>,
}

fn output(resp: &Response) -> Result<()> {
    println!("{}", serde_json::to_string(resp)?);
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    if config.store_backend == StoreBackend::Memory {
        tracing::warn!("INVENTORY_STORE=memory: changes are lost when this command exits");
    }

    let deps = ServerDeps::from_config(&config)
        .await
        .context("Failed to connect to the inventory store")?;

    let response = match cli.command {
        Commands::Reset => reset(&deps.repository).await?,
        Commands::List => list(&deps.repository).await?,
        Commands::Load { file } => load(&deps, &file).await?,
    };

    output(&response)
}

async fn reset(repo: &InventoryRepository) -> Result<Response> {
    repo.remove_all().await?;
    Ok(Response {
        success: true,
        message: Some("All inventories removed".to_string()),
        inventories: None,
    })
}

async fn list(repo: &InventoryRepository) -> Result<Response> {
    let mut inventories: Vec<InventoryData> = repo
        .all()
        .await?
        .into_iter()
        .map(InventoryData::from)
        .collect();
    inventories.sort_by_key(|inventory| inventory.id);

    Ok(Response {
        success: true,
        message: None,
        inventories: Some(inventories),
    })
}

async fn load(deps: &ServerDeps, file: &Path) -> Result<Response> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let payload: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", file.display()))?;

    let entries = payload
        .as_array()
        .context("Expected a JSON array of inventories")?;

    let mut saved = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        let mut inventory = deps
            .schema
            .validate(entry)
            .with_context(|| format!("Entry {} is not a valid inventory", position))?;
        deps.repository.save(&mut inventory).await?;
        saved.push(inventory.serialize());
    }

    Ok(Response {
        success: true,
        message: Some(format!("Loaded {} inventories", saved.len())),
        inventories: Some(saved),
    })
}
