// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::error;

use super::validation::ValidationResult;

/// API error types
///
/// Every handler converts its failures into one of these at its own
/// boundary; callers only ever see a status code and `{error, code}`.
#[derive(Debug)]
pub enum ApiError {
    /// A required environment variable is missing.
    ConfigurationError(String),
    /// Missing OAuth code or time-entry fields.
    InvalidRequest(String),
    /// No session cookie, or Harvest rejected the token.
    Unauthenticated(String),
    /// Harvest answered with a non-2xx, non-auth status.
    UpstreamError { status: StatusCode, message: String },
    /// Network or parse failure. Logged; the caller gets the message only.
    ServerError(String),
}

impl ApiError {
    /// Mirrors an upstream status code. Codes axum cannot represent become 502.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        ApiError::UpstreamError {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ConfigurationError(_) | ApiError::ServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::UpstreamError { status, .. } => *status,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ConfigurationError(msg) => write!(f, "Configuration Error: {}", msg),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid Request: {}", msg),
            ApiError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            ApiError::UpstreamError { status, message } => {
                write!(f, "Upstream Error ({}): {}", status.as_u16(), message)
            }
            ApiError::ServerError(msg) => write!(f, "Server Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let (error_message, code) = match self {
            ApiError::ConfigurationError(msg) => {
                error!(error = %msg, "Configuration error");
                (msg, "CONFIGURATION_ERROR")
            }
            ApiError::InvalidRequest(msg) => (msg, "INVALID_REQUEST"),
            ApiError::Unauthenticated(msg) => (msg, "UNAUTHENTICATED"),
            ApiError::UpstreamError { message, .. } => (message, "UPSTREAM_ERROR"),
            ApiError::ServerError(msg) => {
                error!(error = %msg, "Server error");
                (msg, "SERVER_ERROR")
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Helper function to convert ValidationResult to ApiError
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid {
            ApiError::ServerError("Validation result was valid but converted to error".to_string())
        } else {
            let error_messages: Vec<String> = result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect();
            ApiError::InvalidRequest(error_messages.join(", "))
        }
    }
}
