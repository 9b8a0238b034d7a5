//! Cache validation headers for API reads.
//!
//! Successful `GET` responses carry `Cache-Control` and a strong `ETag`
//! computed from the body. A request whose `If-None-Match` matches the
//! current tag gets `304 Not Modified` without a body.

use crate::responses::AppError;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use routine_core::RoutineError;
use sha2::{Digest, Sha256};
use tracing::warn;

/// `Cache-Control` sent with every successful API read.
pub const API_CACHE_CONTROL: &str = "private, max-age=60, must-revalidate";

/// Adds `Cache-Control`/`ETag` to successful reads and answers conditional ones.
pub async fn http_cache_middleware(request: Request<Body>, next: Next) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }
    let if_none_match = request.headers().get(header::IF_NONE_MATCH).cloned();

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to buffer response body: {}", e);
            return AppError(RoutineError::internal("failed to buffer response body"))
                .into_response();
        }
    };

    let etag = entity_tag(&bytes);
    parts.headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(API_CACHE_CONTROL),
    );
    if let Ok(value) = HeaderValue::from_str(&etag) {
        parts.headers.insert(header::ETAG, value);
    }

    if if_none_match.is_some_and(|value| tag_matches(&value, &etag)) {
        parts.status = StatusCode::NOT_MODIFIED;
        parts.headers.remove(header::CONTENT_LENGTH);
        return Response::from_parts(parts, Body::empty());
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// Quoted hex SHA-256 of the body.
fn entity_tag(body: &[u8]) -> String {
    format!("\"{:x}\"", Sha256::digest(body))
}

/// Weak comparison, as `If-None-Match` requires.
fn tag_matches(if_none_match: &HeaderValue, etag: &str) -> bool {
    if_none_match.to_str().is_ok_and(|value| {
        value
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == "*" || candidate.trim_start_matches("W/") == etag)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_tag_is_stable_and_quoted() {
        let tag = entity_tag(b"{\"CompanyName\":\"Microsoft\"}");
        assert_eq!(tag, entity_tag(b"{\"CompanyName\":\"Microsoft\"}"));
        assert_ne!(tag, entity_tag(b"{\"CompanyName\":\"Google\"}"));
        assert!(tag.starts_with('"') && tag.ends_with('"'));
        assert_eq!(tag.len(), 66);
    }

    #[test]
    fn test_tag_matches_lists_weak_tags_and_wildcard() {
        let etag = entity_tag(b"body");
        let listed = HeaderValue::from_str(&format!("\"other\", W/{}", etag)).unwrap();
        assert!(tag_matches(&listed, &etag));
        assert!(tag_matches(&HeaderValue::from_static("*"), &etag));
        assert!(!tag_matches(&HeaderValue::from_static("\"other\""), &etag));
    }
}
