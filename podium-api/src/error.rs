//! Error payload returned by the Podium API.
//!
//! Non-2xx responses carry a JSON `ApiError` body. The `ErrorCode` enum is
//! the stable, machine-readable half of the contract; `message` is for
//! humans and may change without notice.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request lacks valid authentication credentials
    Unauthorized,
    /// Request is authenticated but lacks permission for the resource
    Forbidden,
    /// Request validation failed
    ValidationFailed,
    /// Request contains invalid input data
    InvalidInput,
    /// Referenced contest, problem, or user does not exist
    NotFound,
    /// Too many requests from this client
    RateLimited,
    /// Unexpected server-side failure
    Internal,
    /// Server is temporarily unable to serve the request
    Unavailable,
}

impl ErrorCode {
    /// Default human-readable message for this code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "Authentication required",
            ErrorCode::Forbidden => "Permission denied",
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RateLimited => "Too many requests",
            ErrorCode::Internal => "Internal server error",
            ErrorCode::Unavailable => "Service temporarily unavailable",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::Internal => "INTERNAL",
            ErrorCode::Unavailable => "UNAVAILABLE",
        };
        write!(f, "{}", value)
    }
}

/// Structured error payload carried by non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_uses_screaming_snake_case_wire_form() {
        let json = serde_json::to_string(&ErrorCode::ValidationFailed).unwrap();
        assert_eq!(json, "\"VALIDATION_FAILED\"");
    }

    #[test]
    fn api_error_parses_server_payload() {
        let json = r#"{ "code": "NOT_FOUND", "message": "no such contest" }"#;
        let error: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(error.code, ErrorCode::NotFound);
        assert_eq!(error.message, "no such contest");
        assert!(error.details.is_none());
    }

    #[test]
    fn display_joins_code_and_message() {
        let error = ApiError::from_code(ErrorCode::RateLimited);
        assert_eq!(error.to_string(), "RATE_LIMITED: Too many requests");
    }
}
