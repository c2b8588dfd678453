//! Lesson Guard - content cache and request throttling for a video-learning backend
//!
//! Keeps expensive generated content (checkpoints, quizzes, summaries) in
//! per-category TTL caches and bounds how often users and videos may trigger
//! new generations with a sliding-window rate limiter.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod ratelimit;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{AppError, Result};
pub use tasks::spawn_sweep_task;
