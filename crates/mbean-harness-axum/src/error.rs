//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and `RegistryError` to HTTP status codes and a small
//! JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mbean_harness_core::{CoreError, RegistryError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (undecodable body, invalid identifier).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Conflict (identifier already registered).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Registry(registry_err) => registry_err.into(),
            CoreError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}

impl From<RegistryError> for HttpError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::InvalidName(e) => Self::BadRequest(e.to_string()),
            err @ RegistryError::PatternNotAllowed(_) => Self::BadRequest(err.to_string()),
            err @ RegistryError::InstanceAlreadyExists(_) => Self::Conflict(err.to_string()),
            err @ RegistryError::InstanceNotFound(_) => Self::NotFound(err.to_string()),
            err @ (RegistryError::RegistrationVetoed(_)
            | RegistryError::DeregistrationVetoed { .. }) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_map_to_status_codes() {
        let cases = [
            (
                RegistryError::InstanceAlreadyExists("test:type=Cat,name=a".into()),
                StatusCode::CONFLICT,
            ),
            (
                RegistryError::InstanceNotFound("test:type=Cat,name=a".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                RegistryError::PatternNotAllowed("test:type=Cat,name=*".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                RegistryError::RegistrationVetoed("no".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = HttpError::from(CoreError::from(err)).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn validation_error_is_bad_request() {
        let response = HttpError::from(CoreError::Validation("empty name".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
