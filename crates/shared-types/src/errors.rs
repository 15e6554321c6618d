//! Common error types used across the tooltip crates
//! Provides consistent error handling and reporting to JavaScript

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for tooltip overlay operations.
///
/// The hover state machine itself never fails; these cover construction,
/// configuration and host interop.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum TooltipError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Host resource unavailable: {resource}")]
    HostUnavailable { resource: String },

    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

/// Result type alias for tooltip operations
pub type TooltipResult<T> = Result<T, TooltipError>;

/// Error response structure for JavaScript interop
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: TooltipError,
    pub timestamp: u64,
    pub context: Option<ErrorContext>,
}

/// Additional context for error reporting
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
}

impl ErrorResponse {
    /// Create a new error response stamped with `timestamp` (ms since epoch)
    pub fn new(error: TooltipError, timestamp: u64) -> Self {
        Self {
            success: false,
            error,
            timestamp,
            context: None,
        }
    }

    /// Add context to the error response
    pub fn with_context(mut self, component: &str, operation: &str) -> Self {
        self.context = Some(ErrorContext {
            component: component.to_string(),
            operation: operation.to_string(),
        });
        self
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"type":"JsInterop","details":{"message":"Failed to serialize error"}}}"#.to_string()
        })
    }
}

impl From<serde_json::Error> for TooltipError {
    fn from(err: serde_json::Error) -> Self {
        TooltipError::ConfigParse {
            message: err.to_string(),
        }
    }
}
