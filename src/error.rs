//! Error types for the service
//!
//! Provides unified error handling using thiserror.
//!
//! Cache misses and rate-limit denials are ordinary results inside the
//! cache and limiter; they only become errors here, at the policy and HTTP
//! boundary.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown resource (content category, route parameter)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data or rate-limit parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller exceeded the request quota for `key`
    #[error("Rate limit exceeded for {key}, retry after {retry_after_secs}s")]
    RateLimited { key: String, retry_after_secs: u64 },

    /// Content generation collaborator failed
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        match self {
            AppError::RateLimited {
                retry_after_secs, ..
            } => {
                let body = Json(json!({
                    "error": message,
                    "retry_after": retry_after_secs,
                }));
                let mut response = (status, body).into_response();
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
                response
            }
            _ => (status, Json(json!({ "error": message }))).into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (AppError::NotFound("quizz".into()), StatusCode::NOT_FOUND),
            (AppError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (
                AppError::RateLimited {
                    key: "user:alice".into(),
                    retry_after_secs: 3,
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (AppError::Generation("timeout".into()), StatusCode::BAD_GATEWAY),
            (AppError::Internal("error".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[tokio::test]
    async fn test_rate_limited_response_carries_retry_after() {
        let response = AppError::RateLimited {
            key: "video:vid1".into(),
            retry_after_secs: 3600,
        }
        .into_response();

        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "3600"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["retry_after"], 3600);
        assert!(json["error"].as_str().unwrap().contains("video:vid1"));
    }
}
