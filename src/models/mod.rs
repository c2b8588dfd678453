//! Data models for the service
//!
//! Typed payloads for each cached content category, plus the DTOs used by
//! the admin HTTP surface.

pub mod content;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use content::{Checkpoint, CheckpointSet, Quiz, QuizQuestion, Summary};
pub use requests::ClearRateLimitQuery;
pub use responses::{
    CategoryStats, ClearCacheResponse, ClearRateLimitResponse, HealthResponse, RemoveResponse,
    StatsResponse,
};
