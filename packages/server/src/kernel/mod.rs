//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod memory_store;
pub mod redis_store;
pub mod traits;

pub use deps::ServerDeps;
pub use memory_store::MemoryStore;
pub use redis_store::{RedisEndpoint, RedisStore};
pub use traits::*;
