//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the request path ends up as an [`AppError`], which renders
//! as a JSON body of the form:
//!
//! ```json
//! { "error": { "code": "internal_error", "message": "...", "details": {} } }
//! ```
//!
//! Validation outcomes of the submit endpoint are not errors and never reach this type;
//! they are answered with plain-text bodies by the handler itself.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::SessionStoreError;
use crate::utils::qr_encoder::EncodeError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Unavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Unavailable { message, details } => {
                ("service_unavailable", message, details)
            }
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EncodeError> for AppError {
    fn from(e: EncodeError) -> Self {
        tracing::error!("QR encoding failed: {}", e);
        AppError::internal("Failed to generate QR code", json!({ "reason": e.to_string() }))
    }
}

impl From<SessionStoreError> for AppError {
    fn from(e: SessionStoreError) -> Self {
        tracing::error!("Session store failure: {}", e);
        match e {
            SessionStoreError::Connection(reason) => {
                AppError::unavailable("Session store unavailable", json!({ "reason": reason }))
            }
            SessionStoreError::Operation(reason) | SessionStoreError::Corrupt(reason) => {
                AppError::internal("Session store error", json!({ "reason": reason }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("bad", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unavailable("down", json!({})).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::internal("boom", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_connection_error_is_unavailable() {
        let err: AppError = SessionStoreError::Connection("refused".to_string()).into();
        assert!(matches!(err, AppError::Unavailable { .. }));

        let info = err.to_error_info();
        assert_eq!(info.code, "service_unavailable");
        assert_eq!(info.details["reason"], "refused");
    }

    #[test]
    fn test_store_corrupt_record_is_internal() {
        let err: AppError = SessionStoreError::Corrupt("bad json".to_string()).into();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_encode_error_is_internal() {
        let err: AppError = EncodeError::Symbol("data too long".to_string()).into();
        assert!(matches!(err, AppError::Internal { .. }));

        let info = err.to_error_info();
        assert_eq!(info.code, "internal_error");
        assert_eq!(info.message, "Failed to generate QR code");
        assert!(
            info.details["reason"]
                .as_str()
                .unwrap()
                .contains("data too long")
        );

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
