/// Persistence adapters for the project registry
mod sqlite_registry;

pub use sqlite_registry::{SqliteProjectRegistry, DEFAULT_REGISTRY_PATH};
