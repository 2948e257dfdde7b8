//! Access-check middleware.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use khair_app::ports::AccessPolicy;

use crate::error::ApiError;

/// Consult `policy` with the request's bearer key before running the handler.
pub async fn require_access<P>(
    State(policy): State<Arc<P>>,
    request: Request,
    next: Next,
) -> Response
where
    P: AccessPolicy + Send + Sync + 'static,
{
    let credential = bearer_token(request.headers()).map(str::to_owned);

    match policy.check(credential.as_deref()).await {
        Ok(()) => next.run(request).await,
        Err(denied) => {
            tracing::debug!(reason = %denied, "request refused");
            ApiError::from(denied).into_response()
        }
    }
}

/// Extract `<key>` from `Authorization: Bearer <key>`.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
