//! Adds the request path and trace id to error bodies.

use crate::responses::ErrorBody;
use axum::{
    body::Body,
    http::{header, HeaderName, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Header carrying the per-request trace id.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Re-renders error bodies with `instance` and `traceId` filled in.
pub async fn error_context_middleware(request: Request<Body>, next: Next) -> Response {
    let instance = request.uri().path().to_string();
    let trace_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let response = next.run(request).await;

    match response.extensions().get::<ErrorBody>().cloned() {
        Some(body) => {
            let (parts, _) = response.into_parts();
            let mut rendered = body.with_context(&instance, trace_id).into_response();
            for (name, value) in &parts.headers {
                if name != header::CONTENT_LENGTH && !rendered.headers().contains_key(name) {
                    rendered.headers_mut().insert(name.clone(), value.clone());
                }
            }
            rendered
        }
        None => response,
    }
}
