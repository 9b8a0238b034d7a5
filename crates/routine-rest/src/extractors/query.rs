//! Query string extractors.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use routine_core::RoutineError;
use serde::{de::DeserializeOwned, Deserialize};
use utoipa::IntoParams;

/// Query string extractor whose rejection is a 400 in the API error format.
#[derive(Debug, Clone, Default)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError(RoutineError::invalid_query(e.body_text())))?;
        Ok(Self(value))
    }
}

/// `?fields=` on single-resource reads.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FieldsQuery {
    /// Comma separated field names to return.
    pub fields: Option<String>,
}
