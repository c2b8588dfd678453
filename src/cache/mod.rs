//! Cache Module
//!
//! In-memory memoization of generated content with per-instance TTL and
//! lazy expiry on read.

mod content;
mod entry;
pub mod keys;
mod memoize;
mod stats;
mod store;


// Re-export public types
pub use content::{ContentCaches, ContentKind};
pub use entry::CacheEntry;
pub use memoize::{get_or_generate, shared, SharedCache};
pub use stats::CacheStats;
pub use store::ExpiringCache;
