//! Rate Limit Policy Module
//!
//! Maps a request subject to a scope key and turns a denial into an error
//! the HTTP layer can surface.

use std::fmt;

use tracing::warn;

use crate::error::{AppError, Result};
use crate::ratelimit::{RateLimit, RateLimitDecision, SharedLimiter};

// == Scope ==
/// What a quota is counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// An authenticated caller, bounding per-user generation cost
    User,
    /// A piece of content, bounding regeneration of the same artifact
    /// regardless of who asks
    Video,
}

impl Scope {
    /// Prefix used in limiter keys.
    pub fn prefix(&self) -> &'static str {
        match self {
            Scope::User => "user",
            Scope::Video => "video",
        }
    }

    /// Builds the limiter key for `subject`, e.g. `user:42`.
    pub fn key(&self, subject: &str) -> String {
        format!("{}:{}", self.prefix(), subject)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// == Policy ==
/// A quota applied to one kind of scope key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub scope: Scope,
    pub limit: RateLimit,
}

impl RateLimitPolicy {
    // == Constructors ==
    /// Applies `limit` to keys of `scope`.
    pub fn new(scope: Scope, limit: RateLimit) -> Self {
        Self { scope, limit }
    }

    /// Quota counted per authenticated user.
    pub fn per_user(limit: RateLimit) -> Self {
        Self::new(Scope::User, limit)
    }

    /// Quota counted per video.
    pub fn per_video(limit: RateLimit) -> Self {
        Self::new(Scope::Video, limit)
    }

    // == Enforce ==
    /// Checks `subject` against the quota, recording it when admitted.
    ///
    /// A denial becomes `AppError::RateLimited` carrying the wait hint.
    pub async fn enforce(&self, limiter: &SharedLimiter, subject: &str) -> Result<()> {
        let key = self.scope.key(subject);
        let decision = limiter.write().await.is_allowed(&key, self.limit);

        match decision {
            RateLimitDecision::Allowed => Ok(()),
            RateLimitDecision::Denied { retry_after_secs } => {
                warn!(key = %key, retry_after_secs, "rate limit exceeded");
                Err(AppError::RateLimited {
                    key,
                    retry_after_secs,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratelimit::SlidingWindowLimiter;

    #[test]
    fn test_scope_keys() {
        assert_eq!(Scope::User.key("alice"), "user:alice");
        assert_eq!(Scope::Video.key("vid1"), "video:vid1");
    }

    #[tokio::test]
    async fn test_enforce_denial_carries_retry_after() {
        let limiter = SlidingWindowLimiter::new().shared();
        let policy = RateLimitPolicy::per_user(RateLimit::per_seconds(1, 60).unwrap());

        policy.enforce(&limiter, "alice").await.unwrap();
        let err = policy.enforce(&limiter, "alice").await.unwrap_err();

        match err {
            AppError::RateLimited {
                key,
                retry_after_secs,
            } => {
                assert_eq!(key, "user:alice");
                assert!((1..=61).contains(&retry_after_secs));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_user_and_video_scopes_are_separate() {
        let limiter = SlidingWindowLimiter::new().shared();
        let quota = RateLimit::per_seconds(1, 60).unwrap();
        let by_user = RateLimitPolicy::per_user(quota);
        let by_video = RateLimitPolicy::per_video(quota);

        by_user.enforce(&limiter, "42").await.unwrap();
        by_video.enforce(&limiter, "42").await.unwrap();
        assert!(by_user.enforce(&limiter, "42").await.is_err());
        assert_eq!(limiter.read().await.tracked_keys(), 2);
    }
}
