//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Access denied")]
    Forbidden,

    // Resource errors
    #[error("{0} not found")]
    NotFound(&'static str),

    // Business rule violations
    #[error("Duplicate employee exists in the same department")]
    DuplicateEmployee,

    #[error("Username is already taken")]
    DuplicateUsername,

    #[error("Department name is already taken")]
    DuplicateDepartment,

    #[error("Department does not exist")]
    DepartmentNotFound,

    #[error("Employee is not eligible for a holiday before {earliest}")]
    EligibilityViolation { earliest: chrono::NaiveDate },

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::InvalidToken | AppError::Jwt(_) => "INVALID_TOKEN",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DuplicateEmployee => "DUPLICATE_EMPLOYEE",
            AppError::DuplicateUsername => "DUPLICATE_USERNAME",
            AppError::DuplicateDepartment => "DUPLICATE_DEPARTMENT",
            AppError::DepartmentNotFound => "DEPARTMENT_NOT_FOUND",
            AppError::EligibilityViolation { .. } => "ELIGIBILITY_VIOLATION",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized
            | AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::EligibilityViolation { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmployee
            | AppError::DuplicateUsername
            | AppError::DuplicateDepartment
            | AppError::DepartmentNotFound
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Hide details for internal/security errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Client errors carry their full message
            _ => self.to_string(),
        }
    }

    /// Response body in the `{"error": {code, message}}` envelope.
    fn body(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.user_message(),
            }
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Map a store error to `duplicate` when it is a unique-constraint
    /// violation. The pre-insert duplicate checks can race with a concurrent
    /// writer; the database constraint is the backstop and must not surface
    /// as a 500.
    pub fn on_unique_violation(err: sea_orm::DbErr, duplicate: AppError) -> AppError {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => duplicate,
            _ => AppError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("employee").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateEmployee.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DepartmentNotFound.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn body_uses_the_error_envelope() {
        let body = AppError::DuplicateEmployee.body();
        assert_eq!(body["error"]["code"], "DUPLICATE_EMPLOYEE");
        assert_eq!(
            body["error"]["message"],
            "Duplicate employee exists in the same department"
        );
    }

    #[test]
    fn internal_details_stay_out_of_the_body() {
        let body = AppError::internal("connection pool exhausted").body();
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn eligibility_violation_is_forbidden() {
        let err = AppError::EligibilityViolation {
            earliest: chrono::NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
        };
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "ELIGIBILITY_VIOLATION");
    }
}
