//! JSON body extractor reporting rejections in the API error format.

use crate::responses::ErrorBody;
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use routine_core::{ErrorResponse, FieldError, RoutineError};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Deserialized JSON body.
///
/// A body that parses but does not fit the target type is a 422 problem
/// document; syntax and content type errors keep axum's status.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

/// Rejection type for JSON body extraction.
#[derive(Debug)]
pub struct JsonBodyRejection(ErrorBody);

impl From<JsonRejection> for JsonBodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());

        let body = match rejection {
            JsonRejection::JsonDataError(e) => ErrorBody::from_error(&RoutineError::validation(
                "Request body does not match the expected shape",
                vec![FieldError {
                    field: "body".to_string(),
                    message: e.body_text(),
                    code: "invalid_body".to_string(),
                }],
            )),
            other => ErrorBody::Standard {
                status: other.status(),
                body: ErrorResponse {
                    code: "INVALID_JSON".to_string(),
                    message: other.body_text(),
                    details: None,
                    trace_id: None,
                },
            },
        };
        Self(body)
    }
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
