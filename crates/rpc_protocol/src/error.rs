//! API error types

use serde::{Deserialize, Serialize};

/// Error codes carried in error responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The request body or parameters were rejected
    InvalidRequest = -32600,
    /// Internal server error
    InternalError = -32603,
    /// The requested resource was not found
    NotFound = -32003,
    /// The request conflicts with existing data
    Conflict = -32004,
}

/// Error object returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// Creates a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
        }
    }
}

/// Envelope of an error response: `{"error": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}
