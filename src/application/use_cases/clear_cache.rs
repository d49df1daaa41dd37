use crate::ports::outbound::StatusCache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Outcome of a cache invalidation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheClearReport {
    pub requested: usize,
    pub removed: usize,
}

/// ClearCacheUseCase - Evicts cached status bundles by project identifier
///
/// Keys that are not cached are ignored. The next dashboard query refetches
/// the evicted projects from the platform.
pub struct ClearCacheUseCase<C> {
    cache: Arc<C>,
}

impl<C: StatusCache> ClearCacheUseCase<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// Evicts every identifier in `identifiers`
    pub fn execute<S: AsRef<str>>(&self, identifiers: &[S]) -> CacheClearReport {
        let removed = identifiers
            .iter()
            .filter(|identifier| self.cache.delete(identifier.as_ref().trim()))
            .count();

        info!(
            requested = identifiers.len(),
            removed, "cleared cached project statuses"
        );

        CacheClearReport {
            requested: identifiers.len(),
            removed,
        }
    }

    /// Evicts every cached bundle; `requested` counts stored entries, expired ones included
    pub fn execute_all(&self) -> CacheClearReport {
        let requested = self.cache.len();
        let removed = self.cache.clear();
        info!(requested, removed, "cleared the whole status cache");
        CacheClearReport { requested, removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch_status::domain::{ProjectIdentifier, StatusBundle};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MockCache {
        entries: Mutex<HashMap<String, StatusBundle>>,
    }

    impl StatusCache for MockCache {
        fn get(&self, key: &str) -> Option<StatusBundle> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        fn set(&self, key: &str, bundle: StatusBundle, _ttl: Duration) {
            self.entries.lock().unwrap().insert(key.to_string(), bundle);
        }

        fn delete(&self, key: &str) -> bool {
            self.entries.lock().unwrap().remove(key).is_some()
        }

        fn clear(&self) -> usize {
            let mut entries = self.entries.lock().unwrap();
            let removed = entries.len();
            entries.clear();
            removed
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    fn seeded(keys: &[&str]) -> Arc<MockCache> {
        let cache = Arc::new(MockCache::default());
        for key in keys {
            let identifier = ProjectIdentifier::new(*key).unwrap();
            cache.set(
                key,
                StatusBundle::unavailable(&identifier),
                Duration::from_secs(60),
            );
        }
        cache
    }

    #[test]
    fn test_clear_single_key() {
        let cache = seeded(&["team/app", "team/api"]);
        let report = ClearCacheUseCase::new(cache.clone()).execute(&["team/app"]);

        assert_eq!(report, CacheClearReport { requested: 1, removed: 1 });
        assert!(cache.get("team/app").is_none());
        assert!(cache.get("team/api").is_some());
    }

    #[test]
    fn test_clear_batch_ignores_unknown_keys() {
        let cache = seeded(&["team/app", "team/api"]);
        let report = ClearCacheUseCase::new(cache.clone()).execute(&[
            "team/app".to_string(),
            "team/unknown".to_string(),
            "team/api".to_string(),
        ]);

        assert_eq!(report.requested, 3);
        assert_eq!(report.removed, 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_all() {
        let cache = seeded(&["team/app", "team/api", "ops/infra"]);
        let report = ClearCacheUseCase::new(cache.clone()).execute_all();

        assert_eq!(report, CacheClearReport { requested: 3, removed: 3 });
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_nothing() {
        let cache = seeded(&["team/app"]);
        let none: [&str; 0] = [];
        let report = ClearCacheUseCase::new(cache.clone()).execute(&none);
        assert_eq!(report.removed, 0);
        assert_eq!(cache.len(), 1);
    }
}
