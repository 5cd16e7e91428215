//! Error handling for the gateway.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing fields, malformed input, or a constraint violation.
    #[error("{0}")]
    BadRequest(String),
    /// Record not found.
    #[error("{0}")]
    NotFound(String),
    /// Storage or runtime failure.
    #[error("{0}")]
    Internal(String),
    /// Storage work exceeded the request timeout and was not applied.
    #[error("{0}")]
    Timeout(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: &'static str,
}

impl AppError {
    pub fn timed_out(timeout: Duration) -> Self {
        AppError::Timeout(format!(
            "request timed out after {} ms",
            timeout.as_millis()
        ))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(code = self.code(), error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<maturalink_core::Error> for AppError {
    fn from(err: maturalink_core::Error) -> Self {
        use maturalink_core::Error;

        match err {
            Error::NotFound { .. } => AppError::NotFound(err.to_string()),
            Error::Validation(_) | Error::Constraint(_) | Error::Duplicate(_) => {
                AppError::BadRequest(err.to_string())
            }
            Error::DeadlineExceeded => AppError::Timeout(err.to_string()),
            Error::Sqlite(_) | Error::Io(_) | Error::UnsupportedSchemaVersion { .. } => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maturalink_core::Error;

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (Error::not_found("argument", 3), StatusCode::NOT_FOUND),
            (Error::Validation("title must not be empty".into()), StatusCode::BAD_REQUEST),
            (Error::Constraint("argument 9 does not exist".into()), StatusCode::BAD_REQUEST),
            (Error::Duplicate("subject".into()), StatusCode::BAD_REQUEST),
            (Error::DeadlineExceeded, StatusCode::GATEWAY_TIMEOUT),
            (
                Error::UnsupportedSchemaVersion {
                    db_version: 9,
                    latest_supported: 1,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::from(Error::not_found("subject", 12));
        assert_eq!(err.to_string(), "subject not found: 12");
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_timeout_response() {
        let err = AppError::timed_out(Duration::from_millis(250));
        assert_eq!(err.to_string(), "request timed out after 250 ms");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
