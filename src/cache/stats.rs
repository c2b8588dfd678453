//! Cache Statistics Module
//!
//! Diagnostic counters for a single content cache.

use serde::Serialize;

// == Cache Stats ==
/// Diagnostic counters kept by each cache instance.
///
/// None of these values carry correctness weight; `total_entries` in
/// particular includes entries that are expired but not yet evicted.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CacheStats {
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups that found nothing live (absent or expired)
    pub misses: u64,
    /// Entries dropped because a lookup or sweep found them expired
    pub expirations: u64,
    /// Entries dropped to honour the optional capacity bound
    pub evictions: u64,
    /// Current number of stored entries
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Recording ==
    /// Counts a lookup that returned a live value.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Counts a lookup that found nothing live.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Adds `count` entries dropped for being expired.
    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }

    /// Counts one entry dropped to honour the capacity bound.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Total Entries ==
    /// Updates the stored-entry count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
