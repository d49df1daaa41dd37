use crate::branch_status::domain::StatusBundle;
use std::time::Duration;

/// StatusCache port for time-boxed storage of computed status bundles
///
/// Entries are keyed by project identifier and replaced wholesale; there is
/// no partial update. Reads of an expired entry behave as a miss.
/// Implementations must tolerate concurrent readers and writers.
pub trait StatusCache: Send + Sync {
    /// Returns the bundle stored under `key` if present and unexpired
    fn get(&self, key: &str) -> Option<StatusBundle>;

    /// Stores `bundle` under `key` for `ttl`, replacing any previous entry
    fn set(&self, key: &str, bundle: StatusBundle, ttl: Duration);

    /// Evicts `key`; returns whether a live entry was removed
    fn delete(&self, key: &str) -> bool;

    /// Evicts every entry; returns how many live entries were removed
    fn clear(&self) -> usize;

    /// Number of stored entries, expired ones included until purged
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
