use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope `code` meaning success.
pub const CODE_OK: i64 = 0;

/// Envelope `code` meaning authentication required or expired.
pub const CODE_UNAUTHORIZED: i64 = 401;

/// Wire wrapper applied to every API response: `{"code", "message", "data"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == CODE_OK
    }

    /// Server message, treating an empty string as absent.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub total: i64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
