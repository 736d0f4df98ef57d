//! Caching infrastructure for the service layer.
//!
//! A small key-value abstraction with Redis and in-memory implementations,
//! plus the key namespace and metrics used by the employee query layer.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
pub mod metrics;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCache;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
