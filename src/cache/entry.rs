//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their age check.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached payload together with the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant of insertion or last overwrite
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// Boundary condition: an entry is live only while its age is strictly
    /// less than the TTL, so an entry whose age equals the TTL is expired.
    /// A zero TTL therefore never yields a live entry.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        self.age(now) >= ttl
    }
}
