use serde::Serialize;

use crate::error::Result;

/// Envelope handed to the presentation layer.
///
/// A successful view serializes as `{"success": true, "data": ...}`, a failed one as
/// `{"success": false, "error": "..."}`. Partial data is never returned next to an error.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }

    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: i64,
}

impl HealthStatus {
    pub fn ok(timestamp: i64) -> Self {
        Self { status: "ok", timestamp }
    }
}
