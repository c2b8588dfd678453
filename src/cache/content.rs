//! Per-category content caches.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use crate::cache::{shared, CacheStats, ExpiringCache, SharedCache};
use crate::config::Config;
use crate::error::AppError;
use crate::models::{CheckpointSet, Quiz, Summary};

// == Content Kind ==
/// The categories of generated content that are cached independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Checkpoints,
    Quiz,
    Summary,
}

impl ContentKind {
    /// Every category, in reporting order.
    pub const ALL: [ContentKind; 3] = [Self::Checkpoints, Self::Quiz, Self::Summary];

    /// Name used in admin routes and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checkpoints => "checkpoints",
            Self::Quiz => "quiz",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkpoints" => Ok(Self::Checkpoints),
            "quiz" => Ok(Self::Quiz),
            "summary" => Ok(Self::Summary),
            other => Err(AppError::NotFound(format!(
                "Unknown content category: {}",
                other
            ))),
        }
    }
}

// == Content Caches ==
/// One independently configured cache per content category.
///
/// Cloning is cheap and yields handles to the same underlying instances.
#[derive(Debug, Clone)]
pub struct ContentCaches {
    pub checkpoints: SharedCache<CheckpointSet>,
    pub quiz: SharedCache<Quiz>,
    pub summary: SharedCache<Summary>,
}

impl ContentCaches {
    /// Creates unbounded caches with the given TTLs.
    pub fn new(checkpoints_ttl: Duration, quiz_ttl: Duration, summary_ttl: Duration) -> Self {
        Self {
            checkpoints: shared(ExpiringCache::new(checkpoints_ttl)),
            quiz: shared(ExpiringCache::new(quiz_ttl)),
            summary: shared(ExpiringCache::new(summary_ttl)),
        }
    }

    /// Creates the caches described by the configuration.
    pub fn from_config(config: &Config) -> Self {
        match config.cache_max_entries {
            Some(max) => Self {
                checkpoints: shared(ExpiringCache::with_capacity(config.checkpoint_ttl(), max)),
                quiz: shared(ExpiringCache::with_capacity(config.quiz_ttl(), max)),
                summary: shared(ExpiringCache::with_capacity(config.summary_ttl(), max)),
            },
            None => Self::new(config.checkpoint_ttl(), config.quiz_ttl(), config.summary_ttl()),
        }
    }

    /// Empties one category and returns how many entries were dropped.
    pub async fn clear(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Checkpoints => self.checkpoints.write().await.clear(),
            ContentKind::Quiz => self.quiz.write().await.clear(),
            ContentKind::Summary => self.summary.write().await.clear(),
        }
    }

    /// Removes a single key from one category.
    pub async fn remove(&self, kind: ContentKind, key: &str) -> bool {
        match kind {
            ContentKind::Checkpoints => self.checkpoints.write().await.remove(key),
            ContentKind::Quiz => self.quiz.write().await.remove(key),
            ContentKind::Summary => self.summary.write().await.remove(key),
        }
    }

    /// Snapshot of one category's counters.
    pub async fn stats(&self, kind: ContentKind) -> CacheStats {
        match kind {
            ContentKind::Checkpoints => self.checkpoints.read().await.stats(),
            ContentKind::Quiz => self.quiz.read().await.stats(),
            ContentKind::Summary => self.summary.read().await.stats(),
        }
    }

    /// Lifetime configured for one category.
    pub async fn ttl(&self, kind: ContentKind) -> Duration {
        match kind {
            ContentKind::Checkpoints => self.checkpoints.read().await.ttl(),
            ContentKind::Quiz => self.quiz.read().await.ttl(),
            ContentKind::Summary => self.summary.read().await.ttl(),
        }
    }

    /// Drops expired entries from every category; returns the total removed.
    pub async fn cleanup_expired(&self) -> usize {
        let checkpoints = self.checkpoints.write().await.cleanup_expired();
        let quiz = self.quiz.write().await.cleanup_expired();
        let summary = self.summary.write().await.cleanup_expired();
        checkpoints + quiz + summary
    }
}
