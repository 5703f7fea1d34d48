// Inventory Service - API Core
//
// This crate provides record keeping over inventory entries (id, name,
// quantity, status) behind an HTTP API, backed by an in-memory store or Redis.
//
// Domain logic lives in domains/inventory; storage backends live in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
