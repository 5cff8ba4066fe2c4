//! Error Types for ProtoAi API
//!
//! This module defines error handling for the HTTP layer:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors are serialized as JSON with appropriate HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use protoai_core::{CatalogError, ManifestError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request contains invalid input data
    InvalidInput,

    /// Request or configuration validation failed
    ValidationFailed,

    // ========================================================================
    // Server Errors (500, 503)
    // ========================================================================
    /// Catalog table is missing or unreadable
    CatalogUnavailable,

    /// Catalog table could not be parsed
    CatalogMalformed,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput | ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,

            ErrorCode::CatalogUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            ErrorCode::CatalogMalformed | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
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

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn catalog_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CatalogUnavailable, message)
    }

    pub fn catalog_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CatalogMalformed, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Convert from CatalogError to ApiError.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        tracing::error!(error = %err, "Catalog error");

        match &err {
            CatalogError::NotFound { .. } | CatalogError::Io { .. } => {
                ApiError::catalog_unavailable(err.to_string())
            }
            CatalogError::Malformed { line, .. } => {
                let error = ApiError::catalog_malformed(err.to_string());
                match line {
                    Some(line) => error.with_details(serde_json::json!({ "line": line })),
                    None => error,
                }
            }
            CatalogError::WriteFailed { .. } => ApiError::internal_error(err.to_string()),
        }
    }
}

/// Convert from ManifestError to ApiError.
impl From<ManifestError> for ApiError {
    fn from(err: ManifestError) -> Self {
        tracing::error!(error = %err, "Manifest error");

        match err {
            ManifestError::Invalid { errors } => {
                ApiError::validation_failed("Manifest validation failed")
                    .with_details(serde_json::json!({ "errors": errors }))
            }
            other => ApiError::internal_error(other.to_string()),
        }
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::ValidationFailed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::CatalogUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::CatalogMalformed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_missing_catalog_maps_to_unavailable() {
        let err = ApiError::from(CatalogError::NotFound {
            source_name: "api/repositories.csv".to_string(),
        });
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
        assert!(err.message.contains("api/repositories.csv"));
        assert!(err.status_code().is_server_error());
    }

    #[test]
    fn test_malformed_catalog_carries_line() {
        let err = ApiError::from(CatalogError::malformed(Some(4), "unequal lengths"));
        assert_eq!(err.code, ErrorCode::CatalogMalformed);
        assert_eq!(err.details, Some(serde_json::json!({ "line": 4 })));
    }

    #[test]
    fn test_invalid_manifest_lists_errors() {
        let err = ApiError::from(ManifestError::Invalid {
            errors: vec!["a".to_string(), "b".to_string()],
        });
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details, Some(serde_json::json!({ "errors": ["a", "b"] })));
    }

    #[test]
    fn test_error_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::catalog_unavailable("Catalog source not found: x.csv");
        let json = serde_json::to_string(&err)?;

        assert!(json.contains("CATALOG_UNAVAILABLE"));
        assert!(!json.contains("details"));

        let deserialized: ApiError = serde_json::from_str(&json)?;
        assert_eq!(deserialized, err);
        Ok(())
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::catalog_unavailable("connection refused");
        let display = format!("{}", err);

        assert!(display.contains("CatalogUnavailable"));
        assert!(display.contains("connection refused"));
    }
}
