//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront CLI                     │
//! │                                                                         │
//! │  $ atlas checkout --phone ""                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Form invalid? ─── CoreError::Validation ─────────┐              │  │
//! │  │         │                                         │              │  │
//! │  │         ▼                                         ▼              │  │
//! │  │  Cart empty? ───── CoreError::EmptyCart ──────► ApiError ───────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: response JSON          stderr: {"code": ..., "message": ...}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence failures during cart mutations never reach this type; the
//! store logs them and carries on. `StoreError` only surfaces here when the
//! data directory itself cannot be prepared.

use atlas_core::{CoreError, ValidationError};
use atlas_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// API error returned from commands.
///
/// ## Serialization
/// This is what a caller reads on stderr when a command fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "phone is required"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Cart cannot perform the requested operation
    CartError,

    /// Durable storage could not be prepared
    StorageError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::cart("Cannot place an order with an empty cart"),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { ref path, .. } => {
                tracing::error!(error = %err, "Storage I/O failed");
                ApiError::new(
                    ErrorCode::StorageError,
                    format!("Cannot access {}", path.display()),
                )
            }
            StoreError::QuotaExceeded { .. } | StoreError::Unavailable(_) => {
                ApiError::new(ErrorCode::StorageError, err.to_string())
            }
            StoreError::Serialization(e) => {
                tracing::error!("Serialization failed: {}", e);
                ApiError::internal("Could not encode cart")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_validation_code() {
        let err = ApiError::from(CoreError::from(ValidationError::Required {
            field: "phone".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("phone"));
    }

    #[test]
    fn test_empty_cart_maps_to_cart_code() {
        let err = ApiError::from(CoreError::EmptyCart);
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_io_error_hides_os_detail() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ApiError::from(StoreError::io("/data/atlas", io));
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.message, "Cannot access /data/atlas");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::cart("nope")).unwrap();
        assert_eq!(json["code"], "CART_ERROR");
        assert_eq!(json["message"], "nope");
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::internal("boom").to_string(), "[Internal] boom");
    }
}
