//! Application error type and its HTTP mapping.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Every failure a request can end in.
///
/// None of these terminate the process; each maps to one HTTP status in
/// [`IntoResponse`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Expected parameter {0} not found")]
    MissingParameter(String),

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("Password param incorrect")]
    Unauthorized,

    #[error("Short code '{code}' is already taken")]
    AlreadyTaken { code: String },

    #[error(
        "You've sent too many requests in a short span of time. Try again after {retry_after} seconds"
    )]
    RateLimited { retry_after: u64 },

    #[error("Short link '{code}' not found")]
    NotFound { code: String },

    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

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

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// HTTP status this error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameter(_) | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::AlreadyTaken { .. } => StatusCode::CONFLICT,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the payload sent to clients.
    ///
    /// Store failures are reported generically; the cause is only logged.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            Self::MissingParameter(name) => ErrorInfo {
                code: "missing_parameter",
                message: self.to_string(),
                details: json!({ "parameter": name }),
            },
            Self::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            Self::Unauthorized => ErrorInfo {
                code: "unauthorized",
                message: self.to_string(),
                details: json!({}),
            },
            Self::AlreadyTaken { code } => ErrorInfo {
                code: "already_taken",
                message: self.to_string(),
                details: json!({ "code": code }),
            },
            Self::RateLimited { retry_after } => ErrorInfo {
                code: "rate_limited",
                message: self.to_string(),
                details: json!({ "retry_after": retry_after }),
            },
            Self::NotFound { code } => ErrorInfo {
                code: "not_found",
                message: self.to_string(),
                details: json!({ "code": code }),
            },
            Self::StoreUnavailable(_) => ErrorInfo {
                code: "store_unavailable",
                message: "Storage backend unavailable".to_string(),
                details: json!({}),
            },
            Self::Internal { message, details } => ErrorInfo {
                code: "internal_error",
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_default();
        AppError::bad_request("Validation failed", details)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::StoreUnavailable(ref e) = self {
            tracing::error!("Store unavailable: {}", e);
        }

        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if let Self::RateLimited { retry_after } = self
            && let Ok(value) = HeaderValue::from_str(&retry_after.to_string())
        {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::missing_parameter("longurl").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::AlreadyTaken {
                code: "promo".into()
            }
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::RateLimited { retry_after: 5 }.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::NotFound { code: "x".into() }.status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::Connection("refused".into())).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = AppError::missing_parameter("customurl");
        assert_eq!(err.to_string(), "Expected parameter customurl not found");
    }

    #[test]
    fn test_rate_limited_sets_retry_after_header() {
        let response = AppError::RateLimited { retry_after: 17 }.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "17");
    }

    #[test]
    fn test_store_error_is_not_leaked() {
        let err = AppError::from(StoreError::Connection("10.0.0.3:6379 refused".into()));
        let info = err.to_error_info();

        assert_eq!(info.code, "store_unavailable");
        assert!(!info.message.contains("10.0.0.3"));
    }
}
