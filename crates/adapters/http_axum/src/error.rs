//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use khair_app::ports::AccessDenied;
use khair_domain::error::{ConstraintViolation, KhairError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps use-case failures and access refusals to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Domain(KhairError),
    Denied(AccessDenied),
    UnsupportedMediaType,
}

impl From<KhairError> for ApiError {
    fn from(err: KhairError) -> Self {
        Self::Domain(err)
    }
}

impl From<ConstraintViolation> for ApiError {
    fn from(err: ConstraintViolation) -> Self {
        Self::Domain(err.into())
    }
}

impl From<AccessDenied> for ApiError {
    fn from(err: AccessDenied) -> Self {
        Self::Denied(err)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Domain(err) => match err {
                KhairError::ConstraintViolation(_) | KhairError::InvalidServices(_) => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                KhairError::NotFound(_) | KhairError::NoMatch(_) => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                KhairError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                KhairError::Storage(source) => {
                    tracing::error!(error = %source, "storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error".to_string(),
                    )
                }
            },
            Self::Denied(err) => (StatusCode::UNAUTHORIZED, err.to_string()),
            Self::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "expected Content-Type: application/json".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
