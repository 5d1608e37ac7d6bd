//! Error handler for converting AppError to HTTP responses.
//!
//! Implements the IntoResponse trait for AppError, providing
//! consistent error response formatting across the API with proper
//! status code mapping and error message sanitization.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate → 409 CONFLICT
    /// - SlotConflict → 409 CONFLICT
    /// - AlreadyCompleted → 409 CONFLICT
    /// - Validation / ValidationErrors → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - Database → 500 INTERNAL_SERVER_ERROR
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let code = error_to_code(&self);

        let error_response = match &self {
            AppError::NotFound { .. }
            | AppError::Duplicate { .. }
            | AppError::SlotConflict { .. }
            | AppError::AlreadyCompleted { .. }
            | AppError::Validation { .. }
            | AppError::BadRequest { .. } => ErrorResponse::new(code, &self.to_string()),
            AppError::ValidationErrors { errors } => {
                let details = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                ErrorResponse::new(code, "Request validation failed").with_details(&details)
            }
            AppError::Database { operation, source } => {
                // Raw driver errors stay in the logs, not the response.
                tracing::error!(operation = %operation, error = %source, "Database error");
                ErrorResponse::new(code, &format!("Database operation failed: {}", operation))
            }
            AppError::Configuration { key, source } => {
                tracing::error!(key = %key, error = %source, "Configuration error");
                ErrorResponse::new(code, &format!("Configuration error: {}", key))
            }
            AppError::ConnectionPool { source } => {
                tracing::error!(error = %source, "Connection pool error");
                ErrorResponse::new(code, "Database connection unavailable")
            }
            AppError::Internal { source } => {
                tracing::error!(error = %source, "Internal error");
                ErrorResponse::new(code, "An internal error occurred")
            }
        };

        // The request-id middleware picks the body back up from the
        // extensions to stamp in the correlation id.
        let mut response = (status, Json(error_response.clone())).into_response();
        response.extensions_mut().insert(error_response);
        response
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::SlotConflict { .. } => StatusCode::CONFLICT,
        AppError::AlreadyCompleted { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::SlotConflict { .. } => "SLOT_CONFLICT",
        AppError::AlreadyCompleted { .. } => "ALREADY_COMPLETED",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_not_found_status_code() {
        let error = AppError::not_found("customer", 123);
        assert_eq!(error_to_status_code(&error), StatusCode::NOT_FOUND);
        assert_eq!(error_to_code(&error), "NOT_FOUND");
    }

    #[test]
    fn test_duplicate_status_code() {
        let error = AppError::Duplicate {
            entity: "customer".to_string(),
            field: "phone".to_string(),
            value: "555-0100".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
        assert_eq!(error_to_code(&error), "DUPLICATE_ENTRY");
    }

    #[test]
    fn test_slot_conflict_status_code() {
        let error = AppError::SlotConflict {
            employee_id: 7,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
        assert_eq!(error_to_code(&error), "SLOT_CONFLICT");
    }

    #[test]
    fn test_already_completed_status_code() {
        let error = AppError::AlreadyCompleted { appointment_id: 42 };
        assert_eq!(error_to_status_code(&error), StatusCode::CONFLICT);
        assert_eq!(error_to_code(&error), "ALREADY_COMPLETED");
    }

    #[test]
    fn test_validation_status_code() {
        let error = AppError::Validation {
            field: "email".to_string(),
            reason: "invalid format".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
        assert_eq!(error_to_code(&error), "VALIDATION_ERROR");
    }

    #[test]
    fn test_bad_request_status_code() {
        let error = AppError::BadRequest {
            message: "Invalid input".to_string(),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::BAD_REQUEST);
        assert_eq!(error_to_code(&error), "BAD_REQUEST");
    }

    #[test]
    fn test_database_status_code() {
        let error = AppError::Database {
            operation: "insert customer".to_string(),
            source: anyhow::anyhow!("Connection failed"),
        };
        assert_eq!(
            error_to_status_code(&error),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(error_to_code(&error), "DATABASE_ERROR");
    }

    #[test]
    fn test_connection_pool_status_code() {
        let error = AppError::ConnectionPool {
            source: anyhow::anyhow!("Pool exhausted"),
        };
        assert_eq!(error_to_status_code(&error), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error_to_code(&error), "SERVICE_UNAVAILABLE");
    }

    #[test]
    fn test_internal_status_code() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("Unexpected error"),
        };
        assert_eq!(
            error_to_status_code(&error),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(error_to_code(&error), "INTERNAL_ERROR");
    }

    #[test]
    fn test_not_found_into_response() {
        let error = AppError::not_found("appointment", 9);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_error_sanitized() {
        let error = AppError::Internal {
            source: anyhow::anyhow!("panic with sensitive data"),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
