//! Cache implementations - Redis and in-memory fallback.

mod memory;
mod redis;

pub use memory::InMemoryCache;
pub use redis::{RedisCache, RedisConfig};
