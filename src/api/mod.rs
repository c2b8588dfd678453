//! API Module
//!
//! Admin HTTP surface over the shared caches and rate limiter.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Cache and rate-limit diagnostics
//! - `DELETE /cache/:category` - Clear one content cache
//! - `DELETE /cache/:category/:key` - Remove one cached entry
//! - `DELETE /rate-limit` - Reset rate-limit history

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
