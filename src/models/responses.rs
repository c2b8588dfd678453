//! Response DTOs for the admin API

use std::time::Duration;

use serde::Serialize;

use crate::cache::{CacheStats, ContentKind};

/// Diagnostics for one content cache
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub category: ContentKind,
    /// Entry lifetime for this category
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    /// Stored entries, possibly including expired ones not yet evicted
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl CategoryStats {
    /// Flattens a counter snapshot together with the category's TTL.
    pub fn new(category: ContentKind, ttl: Duration, stats: &CacheStats) -> Self {
        Self {
            category,
            ttl_secs: ttl.as_secs(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub caches: Vec<CategoryStats>,
    /// Scope keys the rate limiter currently tracks
    pub rate_limit_keys: usize,
}

/// Response body for `DELETE /cache/:category`
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub category: ContentKind,
    pub cleared: usize,
}

/// Response body for `DELETE /cache/:category/:key`
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub category: ContentKind,
    pub key: String,
    pub removed: bool,
}

/// Response body for `DELETE /rate-limit`
#[derive(Debug, Clone, Serialize)]
pub struct ClearRateLimitResponse {
    /// The key that was targeted, or `None` for a global reset
    pub key: Option<String>,
    pub cleared: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_stats_from_cache_stats() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.set_total_entries(4);

        let resp = CategoryStats::new(ContentKind::Quiz, Duration::from_secs(90), &stats);
        assert_eq!(resp.total_entries, 4);
        assert_eq!(resp.ttl_secs, 90);
        assert!((resp.hit_rate - 0.5).abs() < 0.001);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["category"], "quiz");
    }

    #[test]
    fn test_clear_rate_limit_response_serialize() {
        let resp = ClearRateLimitResponse {
            key: None,
            cleared: 3,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""key":null"#));
        assert!(json.contains(r#""cleared":3"#));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
