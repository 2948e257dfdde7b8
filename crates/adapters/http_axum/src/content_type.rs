//! JSON content-type guard for API routes.

use axum::body::HttpBody;
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Refuse any request that carries a body not declared as `application/json`.
///
/// Bodiless requests pass whatever their headers say.
pub async fn require_json(request: Request, next: Next) -> Response {
    let has_body = request.body().size_hint().exact() != Some(0);
    if has_body && !is_json(request.headers()) {
        tracing::debug!("request body is not JSON");
        return ApiError::UnsupportedMediaType.into_response();
    }
    next.run(request).await
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}
