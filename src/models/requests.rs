//! Request DTOs for the admin API

use serde::Deserialize;

/// Query string for `DELETE /rate-limit`
///
/// Without `key`, every tracked scope key is cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearRateLimitQuery {
    /// Scope key to clear, e.g. `user:42` or `video:abc`
    #[serde(default)]
    pub key: Option<String>,
}

impl ClearRateLimitQuery {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.key.as_deref() {
            Some("") => Some("Key cannot be empty".to_string()),
            _ => None,
        }
    }
}
