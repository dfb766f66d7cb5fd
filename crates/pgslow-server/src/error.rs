use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use pgslow_core::AppError;

/// API error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.clone(),
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match &err {
            AppError::InvalidArgument { .. } => ApiError::BadRequest(err.to_string()),
            AppError::ExecutionError(_) | AppError::RowsError(_) => {
                ApiError::Internal("Database error".to_string())
            }
            AppError::Timeout(_) => ApiError::ServiceUnavailable(err.to_string()),
            AppError::ConfigError(msg) => {
                ApiError::Internal(format!("Configuration error: {}", msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_invalid_argument_is_bad_request() {
        let api: ApiError = AppError::invalid_argument("query_type", "bogus").into();
        assert!(matches!(&api, ApiError::BadRequest(msg) if msg == "invalid query_type: bogus"));
        assert_eq!(api.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_errors_hide_details() {
        let api: ApiError =
            AppError::ExecutionError(sqlx::Error::Protocol("secret detail".to_string())).into();
        assert!(matches!(&api, ApiError::Internal(msg) if msg == "Database error"));
        assert_eq!(
            api.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let api: ApiError = AppError::RowsError(sqlx::Error::RowNotFound).into();
        assert!(matches!(api, ApiError::Internal(_)));
    }

    #[test]
    fn test_timeout_is_service_unavailable() {
        let api: ApiError = AppError::Timeout(Duration::from_secs(30)).into();
        assert!(matches!(&api, ApiError::ServiceUnavailable(msg) if msg == "Query timed out after 30s"));
        assert_eq!(
            api.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
