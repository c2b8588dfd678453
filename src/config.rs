//! Configuration Module
//!
//! Loads cache lifetimes, rate-limit quotas and server settings from
//! environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;
use crate::ratelimit::{RateLimit, RateLimitPolicy};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime of cached checkpoint sets, in seconds
    pub checkpoint_ttl: u64,
    /// Lifetime of cached quizzes, in seconds
    pub quiz_ttl: u64,
    /// Lifetime of cached summaries, in seconds
    pub summary_ttl: u64,
    /// Optional bound on entries per content cache; unbounded when `None` or 0
    pub cache_max_entries: Option<usize>,
    /// Generation requests allowed per user per window
    pub user_rate_limit: u32,
    /// Per-user window, in seconds
    pub user_rate_window: u64,
    /// Regenerations allowed per video per window
    pub video_rate_limit: u32,
    /// Per-video window, in seconds
    pub video_rate_window: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds, 0 disables the sweep
    pub sweep_interval: u64,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CHECKPOINT_TTL` - Checkpoint cache TTL in seconds (default: 3600)
    /// - `QUIZ_TTL` - Quiz cache TTL in seconds (default: 3600)
    /// - `SUMMARY_TTL` - Summary cache TTL in seconds (default: 7200)
    /// - `CACHE_MAX_ENTRIES` - Entry bound per cache, 0 for none (default: unbounded)
    /// - `USER_RATE_LIMIT` / `USER_RATE_WINDOW` - Per-user quota (default: 10 per 60s)
    /// - `VIDEO_RATE_LIMIT` / `VIDEO_RATE_WINDOW` - Per-video quota (default: 5 per 3600s)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            checkpoint_ttl: env_or("CHECKPOINT_TTL", defaults.checkpoint_ttl),
            quiz_ttl: env_or("QUIZ_TTL", defaults.quiz_ttl),
            summary_ttl: env_or("SUMMARY_TTL", defaults.summary_ttl),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&max| max > 0),
            user_rate_limit: env_or("USER_RATE_LIMIT", defaults.user_rate_limit),
            user_rate_window: env_or("USER_RATE_WINDOW", defaults.user_rate_window),
            video_rate_limit: env_or("VIDEO_RATE_LIMIT", defaults.video_rate_limit),
            video_rate_window: env_or("VIDEO_RATE_WINDOW", defaults.video_rate_window),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            sweep_interval: env_or("SWEEP_INTERVAL", defaults.sweep_interval),
        }
    }

    // == Durations ==
    /// Checkpoint cache lifetime.
    pub fn checkpoint_ttl(&self) -> Duration {
        Duration::from_secs(self.checkpoint_ttl)
    }

    /// Quiz cache lifetime.
    pub fn quiz_ttl(&self) -> Duration {
        Duration::from_secs(self.quiz_ttl)
    }

    /// Summary cache lifetime.
    pub fn summary_ttl(&self) -> Duration {
        Duration::from_secs(self.summary_ttl)
    }

    // == Policies ==
    /// Per-user quota; fails if the configured values are zero.
    pub fn user_policy(&self) -> Result<RateLimitPolicy> {
        RateLimit::per_seconds(self.user_rate_limit, self.user_rate_window)
            .map(RateLimitPolicy::per_user)
    }

    /// Per-video regeneration quota; fails if the configured values are zero.
    pub fn video_policy(&self) -> Result<RateLimitPolicy> {
        RateLimit::per_seconds(self.video_rate_limit, self.video_rate_window)
            .map(RateLimitPolicy::per_video)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            checkpoint_ttl: 3600,
            quiz_ttl: 3600,
            summary_ttl: 7200,
            cache_max_entries: None,
            user_rate_limit: 10,
            user_rate_window: 60,
            video_rate_limit: 5,
            video_rate_window: 3600,
            server_port: 3000,
            sweep_interval: 60,
        }
    }
}
