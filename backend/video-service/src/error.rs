/// Error types for video-service
///
/// Every failure a handler can produce falls into one of four categories.
/// The mapping from `sqlx::Error` below is the only place storage failures are
/// classified; handlers just propagate with `?`.
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Result type for video-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before reaching storage
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Update or delete targeted a key with no row behind it
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unique, foreign key or check constraint rejected the write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Internal error: {0}")]
    Unclassified(String),
}

impl AppError {
    /// Single-field validation failure with a human readable message
    pub fn invalid(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        let mut error = ValidationError::new("invalid");
        error.message = Some(message.into());

        let mut errors = ValidationErrors::new();
        errors.add(field, error);
        AppError::Validation(errors)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("no row matches the given key".into()),
            // SQLSTATE class 23: integrity constraint violation
            sqlx::Error::Database(db_err)
                if db_err.code().is_some_and(|code| code.starts_with("23")) =>
            {
                AppError::ConstraintViolation(db_err.message().to_string())
            }
            other => AppError::Unclassified(other.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let body = match self {
            AppError::Validation(errors) => {
                tracing::warn!(error = %errors, "Request validation failed");
                serde_json::json!({
                    "error": "Validation error",
                    "status": status.as_u16(),
                    "details": errors,
                })
            }
            AppError::NotFound(msg) => {
                tracing::warn!(error = %msg, "Resource not found");
                serde_json::json!({
                    "error": "Not found",
                    "status": status.as_u16(),
                })
            }
            AppError::ConstraintViolation(msg) => {
                tracing::warn!(error = %msg, "Storage constraint violation");
                serde_json::json!({
                    "error": msg,
                    "status": status.as_u16(),
                })
            }
            AppError::Unclassified(msg) => {
                tracing::error!(error = %msg, "Unhandled error");
                serde_json::json!({
                    "error": "Internal server error",
                    "status": status.as_u16(),
                })
            }
        };

        HttpResponse::build(status).json(body)
    }
}
