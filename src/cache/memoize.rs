//! Read-through helper over a shared cache.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::ExpiringCache;

/// A cache instance shared between request handlers.
///
/// Every operation, `get` included, takes the write lock because a lookup
/// may evict an expired entry.
pub type SharedCache<V> = Arc<RwLock<ExpiringCache<V>>>;

/// Wraps a cache so it can be handed to concurrent handlers.
pub fn shared<V>(cache: ExpiringCache<V>) -> SharedCache<V> {
    Arc::new(RwLock::new(cache))
}

/// Returns the live cached value for `key`, or runs `generate` and caches
/// its result.
///
/// The lock is released while `generate` runs. A failed generation is
/// returned to the caller as-is and nothing is cached for it.
pub async fn get_or_generate<V, E, F, Fut>(
    cache: &SharedCache<V>,
    key: &str,
    generate: F,
) -> Result<V, E>
where
    V: Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    if let Some(value) = cache.write().await.get(key) {
        debug!(key, "serving cached content");
        return Ok(value);
    }

    let value = generate().await?;
    cache.write().await.set(key, value.clone());
    debug!(key, "cached freshly generated content");
    Ok(value)
}
