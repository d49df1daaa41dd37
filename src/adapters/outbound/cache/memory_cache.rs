use crate::branch_status::domain::StatusBundle;
use crate::ports::outbound::StatusCache;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default number of bundles kept before eviction starts
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
struct CacheEntry {
    bundle: StatusBundle,
    inserted_at: Instant,
    /// `None` when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// InMemoryStatusCache - Process-local status cache with per-entry TTL
///
/// Backed by a concurrent map, so aggregation requests can read and write
/// without external locking. Expired entries read as misses and are dropped
/// lazily. When the number of entries exceeds the capacity, expired entries
/// are purged first and then the oldest insertions are evicted.
pub struct InMemoryStatusCache {
    entries: DashMap<String, CacheEntry>,
    capacity: usize,
}

impl InMemoryStatusCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every expired entry; returns how many were dropped
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    fn enforce_capacity(&self) {
        if self.entries.len() <= self.capacity {
            return;
        }

        let purged = self.purge_expired();
        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|entry| entry.value().inserted_at)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                    evicted += 1;
                }
                None => break,
            }
        }

        debug!(purged, evicted, capacity = self.capacity, "status cache trimmed");
    }
}

impl Default for InMemoryStatusCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl StatusCache for InMemoryStatusCache {
    fn get(&self, key: &str) -> Option<StatusBundle> {
        let now = Instant::now();
        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired(now) {
                return Some(entry.bundle.clone());
            }
        }

        // The read guard must be released before removing from the same shard
        self.entries
            .remove_if(key, |_, entry| entry.is_expired(now));
        None
    }

    fn set(&self, key: &str, bundle: StatusBundle, ttl: Duration) {
        let now = Instant::now();
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                bundle,
                inserted_at: now,
                expires_at: now.checked_add(ttl),
            },
        );
        self.enforce_capacity();
    }

    fn delete(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .remove(key)
            .map(|(_, entry)| !entry.is_expired(now))
            .unwrap_or(false)
    }

    fn clear(&self) -> usize {
        let now = Instant::now();
        let live = self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .count();
        self.entries.clear();
        live
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
