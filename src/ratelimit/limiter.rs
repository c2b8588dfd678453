//! Sliding Window Limiter Module
//!
//! Admits at most `max_requests` per trailing window for each scope key.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::ratelimit::RequestLog;

/// A limiter instance shared between request handlers.
pub type SharedLimiter = Arc<RwLock<SlidingWindowLimiter>>;

// == Rate Limit ==
/// A validated quota: at most `max_requests` within any trailing `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    max_requests: NonZeroU32,
    window: Duration,
}

impl RateLimit {
    /// Builds a quota, rejecting a zero request count or a zero window.
    pub fn new(max_requests: u32, window: Duration) -> Result<Self> {
        let max_requests = NonZeroU32::new(max_requests).ok_or_else(|| {
            AppError::InvalidRequest("max_requests must be at least 1".to_string())
        })?;
        if window.is_zero() {
            return Err(AppError::InvalidRequest(
                "rate limit window must be longer than zero".to_string(),
            ));
        }
        Ok(Self {
            max_requests,
            window,
        })
    }

    /// Shorthand for a window given in whole seconds.
    pub fn per_seconds(max_requests: u32, window_secs: u64) -> Result<Self> {
        Self::new(max_requests, Duration::from_secs(window_secs))
    }

    /// Requests admitted per window.
    pub fn max_requests(&self) -> u32 {
        self.max_requests.get()
    }

    /// Length of the trailing window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

// == Decision ==
/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// Denied; the caller should wait at least this many seconds (always >= 1)
    Denied { retry_after_secs: u64 },
}

impl RateLimitDecision {
    /// Returns true for an admission.
    pub fn allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Suggested wait in seconds, if denied.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Allowed => None,
            Self::Denied { retry_after_secs } => Some(*retry_after_secs),
        }
    }
}

// == Sliding Window Limiter ==
/// Per-key request logs evaluated lazily on every admission check.
#[derive(Debug, Default)]
pub struct SlidingWindowLimiter {
    windows: HashMap<String, RequestLog>,
}

impl SlidingWindowLimiter {
    // == Constructor ==
    /// Creates a limiter that tracks no keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the limiter for sharing across handlers.
    pub fn shared(self) -> SharedLimiter {
        Arc::new(RwLock::new(self))
    }

    // == Is Allowed ==
    /// Decides whether a request for `key` fits within `limit`.
    ///
    /// Expired instants are purged first. An admitted request is recorded
    /// and counts against every later check in its window; a denied one is
    /// not recorded.
    pub fn is_allowed(&mut self, key: &str, limit: RateLimit) -> RateLimitDecision {
        let now = Instant::now();
        let window = limit.window();
        let log = self.windows.entry(key.to_string()).or_default();
        log.prune(now, window);

        if log.len() < limit.max_requests() as usize {
            log.record(now);
            return RateLimitDecision::Allowed;
        }

        let retry_after_secs = log.retry_after_secs(now, window);
        debug!(key, count = log.len(), retry_after_secs, "request outside quota");
        RateLimitDecision::Denied { retry_after_secs }
    }

    // == Clear ==
    /// Forgets one key, or every key when `key` is `None`.
    ///
    /// Returns the number of keys removed.
    pub fn clear(&mut self, key: Option<&str>) -> usize {
        match key {
            Some(key) => usize::from(self.windows.remove(key).is_some()),
            None => {
                let count = self.windows.len();
                self.windows.clear();
                count
            }
        }
    }

    // == Purge Idle ==
    /// Drops keys with no admitted request inside the trailing `window`.
    ///
    /// `window` should be the longest window any caller uses, or a key could
    /// lose history that a longer quota still counts.
    pub fn purge_idle(&mut self, window: Duration) -> usize {
        let now = Instant::now();
        let before = self.windows.len();
        self.windows.retain(|_, log| {
            log.prune(now, window);
            !log.is_empty()
        });
        before - self.windows.len()
    }

    // == Tracked Keys ==
    /// Number of keys currently tracked, including idle ones.
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }
}
