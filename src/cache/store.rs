//! Cache Store Module
//!
//! TTL-bounded memoization of opaque values behind opaque string keys,
//! with lazy expiry on read.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

// == Expiring Cache ==
/// Key/value store whose entries are served only while younger than `ttl`.
///
/// There is no background eviction: an expired entry stays in the map
/// until a lookup discovers it (or `cleanup_expired` is called), so
/// `size` may count entries that `get` would no longer return.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Diagnostic counters
    stats: CacheStats,
    /// Lifetime of every entry, fixed at construction
    ttl: Duration,
    /// Optional bound on stored entries; `None` means unbounded
    max_entries: Option<usize>,
}

impl<V> ExpiringCache<V> {
    // == Constructor ==
    /// Creates an unbounded cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
            max_entries: None,
        }
    }

    /// Creates a cache that holds at most `max_entries` entries.
    ///
    /// When full, inserting a new key first drops expired entries and then,
    /// if still full, the entry with the oldest store time. A bound of zero
    /// means unbounded, the same as `new`.
    pub fn with_capacity(ttl: Duration, max_entries: usize) -> Self {
        Self {
            max_entries: (max_entries > 0).then_some(max_entries),
            ..Self::new(ttl)
        }
    }

    // == TTL ==
    /// Lifetime applied to every entry of this instance.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns the value last stored under `key` if it is still live.
    ///
    /// An expired entry is removed as part of the lookup and reported as
    /// absent, exactly like a key that was never set.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl, now) => {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "cache entry expired on read");
        }
        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous entry and
    /// resetting its age to zero.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(max_entries) = self.max_entries {
            if !self.entries.contains_key(&key) && self.entries.len() >= max_entries {
                self.make_room(max_entries);
            }
        }

        self.entries.insert(key, CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Remove ==
    /// Removes a single entry, returning whether one was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Empties the cache and returns how many entries were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Size ==
    /// Number of stored entries, including expired ones not yet evicted.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl, now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the diagnostic counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    fn make_room(&mut self, max_entries: usize) {
        if self.cleanup_expired() > 0 && self.entries.len() < max_entries {
            return;
        }

        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.record_eviction();
            debug!(key = %key, "cache full, evicted oldest entry");
        }
    }
}
