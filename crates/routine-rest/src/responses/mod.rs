//! API response types.
//!
//! Write-payload validation failures are rendered as
//! `application/problem+json`; every other error uses [`ErrorResponse`].
//! Both bodies travel in the response extensions as well, so the error
//! context middleware can add the request path and trace id.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use routine_core::{ErrorResponse, FieldError, RoutineError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::error;
use utoipa::ToSchema;

/// Media type of validation problem documents.
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Validation problem document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Messages keyed by the exposed property path, e.g. `Employees[0].EmployeeNo`.
    pub errors: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl ProblemDetails {
    /// Builds a 422 document from field errors.
    #[must_use]
    pub fn unprocessable(field_errors: &[FieldError]) -> Self {
        let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for field_error in field_errors {
            errors
                .entry(exposed_path(&field_error.field))
                .or_default()
                .push(field_error.message.clone());
        }

        Self {
            problem_type: "https://tools.ietf.org/html/rfc4918#section-11.2".to_string(),
            title: "One or more validation errors occurred.".to_string(),
            status: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
            detail: "See the errors property for details.".to_string(),
            instance: None,
            errors,
            trace_id: None,
        }
    }
}

/// Converts a validator path such as `employees[0].employee_no` to the
/// exposed property names, `Employees[0].EmployeeNo`.
fn exposed_path(path: &str) -> String {
    let segments: Vec<String> = path
        .split('.')
        .filter(|segment| *segment != "__all__")
        .map(|segment| {
            let (name, index) = segment.split_at(segment.find('[').unwrap_or(segment.len()));
            let pascal: String = name
                .split('_')
                .filter(|word| !word.is_empty())
                .map(|word| {
                    let mut chars = word.chars();
                    chars.next().map_or_else(String::new, |first| {
                        first.to_uppercase().chain(chars).collect()
                    })
                })
                .collect();
            pascal + index
        })
        .collect();

    if segments.is_empty() {
        "$".to_string()
    } else {
        segments.join(".")
    }
}

/// A rendered error body, before the request context is added.
#[derive(Debug, Clone)]
pub enum ErrorBody {
    Problem(ProblemDetails),
    Standard {
        status: StatusCode,
        body: ErrorResponse,
    },
}

impl ErrorBody {
    /// Renders a domain error.
    #[must_use]
    pub fn from_error(err: &RoutineError) -> Self {
        match err {
            RoutineError::Validation { errors, .. } => {
                Self::Problem(ProblemDetails::unprocessable(errors))
            }
            _ => Self::Standard {
                status: StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body: ErrorResponse::from_error(err),
            },
        }
    }

    /// Fills in the request path and trace id.
    #[must_use]
    pub fn with_context(self, instance: &str, trace_id: Option<String>) -> Self {
        match self {
            Self::Problem(mut problem) => {
                problem.instance = Some(instance.to_string());
                problem.trace_id = trace_id;
                Self::Problem(problem)
            }
            Self::Standard { status, mut body } => {
                body.trace_id = trace_id;
                Self::Standard { status, body }
            }
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let mut response = match &self {
            Self::Problem(problem) => {
                let status = StatusCode::from_u16(problem.status)
                    .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY);
                (
                    status,
                    [(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON))],
                    Json(problem),
                )
                    .into_response()
            }
            Self::Standard { status, body } => (*status, Json(body)).into_response(),
        };
        response.extensions_mut().insert(self);
        response
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub RoutineError);

impl From<RoutineError> for AppError {
    fn from(err: RoutineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if !self.0.is_client_error() {
            error!("Request failed: {}", self.0);
        }
        ErrorBody::from_error(&self.0).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// Helper to create a created (201) response with a `Location` header.
pub fn created<T: Serialize>(location: &str, body: T) -> ApiResult<Response> {
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, header_value(location)?)],
        Json(body),
    )
        .into_response())
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Converts generated text into a header value.
pub fn header_value(value: &str) -> ApiResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError(RoutineError::internal(format!("Invalid header value: {}", e))))
}
