//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::auth::AuthError;
use crate::core_state::CoreError;
use crate::scheduling::ScheduleError;
use crate::uploads::UploadError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Email or password is incorrect")]
    InvalidCredentials,
    #[error("Registration denied: {0}")]
    RegistrationDenied(String),
    #[error("Email already registered")]
    EmailTaken,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Client already booked: {0}")]
    ClientDoubleBooked(String),
    #[error("Employee schedule conflict: {0}")]
    EmployeeOverlap(String),
    #[error("Finalization failed: {0}")]
    FinalizationFailed(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Email or password is incorrect".to_string(),
            ),
            ApiError::RegistrationDenied(detail) => (
                StatusCode::FORBIDDEN,
                "REGISTRATION_DENIED",
                detail.clone(),
            ),
            ApiError::EmailTaken => (
                StatusCode::CONFLICT,
                "EMAIL_TAKEN",
                "An account with that email already exists".to_string(),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::ClientDoubleBooked(detail) => (
                StatusCode::CONFLICT,
                "CLIENT_DOUBLE_BOOKED",
                detail.clone(),
            ),
            ApiError::EmployeeOverlap(detail) => (
                StatusCode::CONFLICT,
                "EMPLOYEE_OVERLAP",
                detail.clone(),
            ),
            ApiError::FinalizationFailed(detail) => {
                tracing::error!(detail, "Finalization rolled back");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "FINALIZATION_FAILED",
                    "Finalization failed and was rolled back".to_string(),
                )
            }
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::ClientDoubleBooked { .. } => {
                ApiError::ClientDoubleBooked(err.to_string())
            }
            ScheduleError::EmployeeOverlap => ApiError::EmployeeOverlap(err.to_string()),
            ScheduleError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ScheduleError::Finalization(reason) => ApiError::FinalizationFailed(reason),
            ScheduleError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidRegistrationKey | AuthError::RegistrationDisabled => {
                ApiError::RegistrationDenied(err.to_string())
            }
            AuthError::InvalidPhone => ApiError::BadRequest(err.to_string()),
            AuthError::EmailTaken => ApiError::EmailTaken,
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Password(e) => ApiError::Internal(e),
            AuthError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Empty | UploadError::UnsupportedType(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UploadError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<crate::db::DatabaseError> for ApiError {
    fn from(err: crate::db::DatabaseError) -> Self {
        match err {
            crate::db::DatabaseError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}
