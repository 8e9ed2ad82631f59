//! Cache-aside layer: backend contract, Redis and in-memory backends, key
//! scheme, and the fail-open facade the services read and write through.

pub mod backend;
pub mod cache_keys;
pub mod layer;
pub mod memory_backend;
pub mod redis_backend;

pub use backend::{CacheBackend, CacheError};
pub use layer::{Cache, DEFAULT_TTL, SHORT_TTL};
pub use memory_backend::MemoryCacheBackend;
pub use redis_backend::RedisCacheBackend;
