/// Cache adapters for computed status bundles
mod memory_cache;

pub use memory_cache::{InMemoryStatusCache, DEFAULT_CACHE_CAPACITY};
