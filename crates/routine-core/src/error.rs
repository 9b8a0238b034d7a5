//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of the Routine API.
///
/// Variants are grouped the way callers react to them: client request
/// errors are rejected before any storage access, not-found is reported
/// separately, and infrastructure failures propagate untranslated.
#[derive(Error, Debug)]
pub enum RoutineError {
    // ============ Client Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Malformed query string (unknown field, unknown sort key, bad paging).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Write payload failed validation.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error, including missing or ambiguous property mappings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RoutineError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidQuery(_) => 400,
            Self::Validation { .. } => 422,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates an invalid query error.
    #[must_use]
    pub fn invalid_query<T: Into<String>>(message: T) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// Creates a validation error carrying per-field details.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T, errors: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for errors caused by the client request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::InvalidQuery(_) | Self::Validation { .. } | Self::Conflict(_)
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RoutineError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    return Self::Conflict(db_err.message().to_string());
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RoutineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
    /// Request trace ID for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `RoutineError`.
    #[must_use]
    pub fn from_error(error: &RoutineError) -> Self {
        let details = match error {
            RoutineError::Validation { errors, .. } if !errors.is_empty() => Some(errors.clone()),
            _ => None,
        };

        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
            trace_id: None,
        }
    }
}

impl From<&RoutineError> for ErrorResponse {
    fn from(error: &RoutineError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(RoutineError::not_found("Company", 1).status_code(), 404);
        assert_eq!(RoutineError::invalid_query("unknown field").status_code(), 400);
        assert_eq!(RoutineError::validation("bad payload", vec![]).status_code(), 422);
        assert_eq!(RoutineError::conflict("duplicate").status_code(), 409);
        assert_eq!(RoutineError::configuration("no mapping").status_code(), 500);
        assert_eq!(RoutineError::Database("db error".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RoutineError::not_found("Company", 1).error_code(), "NOT_FOUND");
        assert_eq!(RoutineError::invalid_query("x").error_code(), "INVALID_QUERY");
        assert_eq!(RoutineError::validation("x", vec![]).error_code(), "VALIDATION_ERROR");
        assert_eq!(RoutineError::configuration("x").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(RoutineError::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_client_errors() {
        assert!(RoutineError::not_found("Employee", "abc").is_client_error());
        assert!(RoutineError::invalid_query("bad").is_client_error());
        assert!(!RoutineError::configuration("missing").is_client_error());
        assert!(!RoutineError::Database("down".to_string()).is_client_error());
    }

    #[test]
    fn test_error_constructors() {
        let not_found = RoutineError::not_found("Company", "123");
        assert!(not_found.to_string().contains("Company"));
        assert!(not_found.to_string().contains("123"));

        let query = RoutineError::invalid_query("unknown sort key 'foo'");
        assert!(query.to_string().contains("foo"));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = RoutineError::not_found("Company", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
        assert!(response.trace_id.is_none());
    }

    #[test]
    fn test_error_response_carries_validation_details() {
        let err = RoutineError::validation(
            "payload invalid",
            vec![FieldError {
                field: "employee_no".to_string(),
                message: "must be 10 characters".to_string(),
                code: "length".to_string(),
            }],
        );
        let response = ErrorResponse::from(&err);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }

    #[test]
    fn test_error_response_omits_empty_optionals() {
        let response = ErrorResponse::from_error(&RoutineError::internal("boom"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(json.get("details").is_none());
        assert!(json.get("traceId").is_none() && json.get("trace_id").is_none());
    }
}
