//! Link builder extractor.

use crate::{hateoas::LinkBuilder, responses::AppError, state::AppState};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use routine_core::RoutineError;
use url::Url;

#[async_trait]
impl<S> FromRequestParts<S> for LinkBuilder
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        if let Some(public_url) = state.public_url {
            return Ok(Self::new(public_url));
        }

        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|host| host.to_str().ok())
            .or_else(|| parts.uri.authority().map(|authority| authority.as_str()))
            .unwrap_or("localhost");
        let base = Url::parse(&format!("http://{}/", host))
            .map_err(|e| AppError(RoutineError::invalid_query(format!("Invalid Host: {}", e))))?;

        Ok(Self::new(base))
    }
}
