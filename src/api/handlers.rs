//! API Handlers
//!
//! Diagnostics and administrative reset for the content caches and the
//! rate limiter.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::cache::{ContentCaches, ContentKind};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    CategoryStats, ClearCacheResponse, ClearRateLimitQuery, ClearRateLimitResponse,
    HealthResponse, RemoveResponse, StatsResponse,
};
use crate::ratelimit::{RateLimitPolicy, SharedLimiter, SlidingWindowLimiter};

/// Application state shared across all handlers.
///
/// Built once at startup and passed to every handler; the caches and the
/// limiter live exactly as long as the process.
#[derive(Clone)]
pub struct AppState {
    /// One cache per content category
    pub caches: ContentCaches,
    /// Process-wide rate limiter
    pub limiter: SharedLimiter,
    /// Quota on generation requests per authenticated user
    pub user_policy: RateLimitPolicy,
    /// Quota on regenerating the same video's content
    pub video_policy: RateLimitPolicy,
}

impl AppState {
    pub fn new(
        caches: ContentCaches,
        limiter: SharedLimiter,
        user_policy: RateLimitPolicy,
        video_policy: RateLimitPolicy,
    ) -> Self {
        Self {
            caches,
            limiter,
            user_policy,
            video_policy,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if a configured quota is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            ContentCaches::from_config(config),
            SlidingWindowLimiter::new().shared(),
            config.user_policy()?,
            config.video_policy()?,
        ))
    }

    /// The longest window any policy counts over.
    pub fn longest_window(&self) -> std::time::Duration {
        self.user_policy
            .limit
            .window()
            .max(self.video_policy.limit.window())
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let mut caches = Vec::with_capacity(ContentKind::ALL.len());
    for kind in ContentKind::ALL {
        let ttl = state.caches.ttl(kind).await;
        let stats = state.caches.stats(kind).await;
        caches.push(CategoryStats::new(kind, ttl, &stats));
    }
    let rate_limit_keys = state.limiter.read().await.tracked_keys();

    Json(StatsResponse {
        caches,
        rate_limit_keys,
    })
}

/// Handler for DELETE /cache/:category
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<ClearCacheResponse>> {
    let category: ContentKind = category.parse()?;
    let cleared = state.caches.clear(category).await;
    info!(%category, cleared, "content cache cleared");

    Ok(Json(ClearCacheResponse { category, cleared }))
}

/// Handler for DELETE /cache/:category/:key
pub async fn remove_cache_entry_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
) -> Result<Json<RemoveResponse>> {
    let category: ContentKind = category.parse()?;
    let removed = state.caches.remove(category, &key).await;

    Ok(Json(RemoveResponse {
        category,
        key,
        removed,
    }))
}

/// Handler for DELETE /rate-limit
pub async fn clear_rate_limit_handler(
    State(state): State<AppState>,
    Query(query): Query<ClearRateLimitQuery>,
) -> Result<Json<ClearRateLimitResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let cleared = state.limiter.write().await.clear(query.key.as_deref());
    info!(key = ?query.key, cleared, "rate limit state cleared");

    Ok(Json(ClearRateLimitResponse {
        key: query.key,
        cleared,
    }))
}
