//! Local Cache Store Module
//!
//! In-process TTL cache kept consistent with the upstream store by the bridge.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use tracing::debug;

use crate::bridge::CacheInvalidator;
use crate::cache::{CacheEntry, CacheStats, MAX_KEY_LENGTH};
use crate::error::{ApiError, Result};

// == Local Cache ==
/// Key-value cache addressed by upstream local keys.
#[derive(Debug)]
pub struct LocalCache {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and invalidation counters
    stats: CacheStats,
    /// TTL applied to entries inserted without one
    default_ttl: Duration,
}

impl LocalCache {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `default_ttl` - Default TTL in seconds for entries without explicit TTL
    pub fn new(default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl: Duration::from_secs(default_ttl),
        }
    }

    // == Insert ==
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Arguments
    /// * `ttl` - Optional TTL in seconds (uses default_ttl if None)
    pub fn insert(&mut self, key: String, value: String, ttl: Option<u64>) -> Result<()> {
        if key.is_empty() {
            return Err(ApiError::InvalidRequest("Key cannot be empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(ApiError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let ttl = ttl.map(Duration::from_secs).unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, Some(ttl)));
        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key. Expired entries are dropped and count as misses.
    pub fn get(&mut self, key: &str) -> Result<String> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Ok(value)
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                Err(ApiError::NotFound(key.to_string()))
            }
            None => {
                self.stats.record_miss();
                Err(ApiError::NotFound(key.to_string()))
            }
        }
    }

    // == Invalidate ==
    /// Drops `key`. Returns true if an entry was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.stats.record_invalidation();
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        self.stats.set_total_entries(self.entries.len());
        before - self.entries.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Invalidation Target ==
impl CacheInvalidator for RwLock<LocalCache> {
    fn invalidate(&self, key: &str) {
        let removed = self
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .invalidate(key);
        debug!(key = %key, removed, "Local cache entry invalidated");
    }
}
