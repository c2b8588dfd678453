//! Rate Limit Module
//!
//! Sliding-window admission control keyed by scope (user or video).

mod limiter;
mod policy;
mod window;


pub use limiter::{RateLimit, RateLimitDecision, SharedLimiter, SlidingWindowLimiter};
pub use policy::{RateLimitPolicy, Scope};
pub use window::RequestLog;
