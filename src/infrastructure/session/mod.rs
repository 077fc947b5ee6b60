//! Session store implementations.
//!
//! - [`RedisSessionStore`] - Production Redis-backed store
//! - [`MemorySessionStore`] - In-process fallback and test store

mod memory_store;
mod redis_store;

pub use memory_store::MemorySessionStore;
pub use redis_store::RedisSessionStore;
