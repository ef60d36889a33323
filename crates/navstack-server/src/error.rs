//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use navstack_core::CoreError;
use navstack_store::StoreError;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Document model error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Remote store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Core(CoreError::MissingField(_)) => "MISSING_FIELD",
            Self::Core(_) => "DOCUMENT_ERROR",
            Self::Store(StoreError::NotFound(_)) => "NOT_FOUND",
            Self::Store(StoreError::Conflict(_)) => "CONFLICT",
            Self::Store(_) => "UPSTREAM_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Core(e) => match e {
                CoreError::MissingField(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(e) => match e {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Conflict(_) => StatusCode::CONFLICT,
                StoreError::Upstream { .. } | StoreError::Http(_) => StatusCode::BAD_GATEWAY,
                StoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "MISSING_FIELD").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_a_bad_request() {
        let err = ApiError::from(CoreError::MissingField("title"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "MISSING_FIELD");
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let err = ApiError::from(StoreError::NotFound("nav.yml".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err = ApiError::from(StoreError::Upstream {
            status: 503,
            path: "data/nav.yml".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.code(), "UPSTREAM_ERROR");
    }

    #[test]
    fn conflict_maps_to_409() {
        let err = ApiError::from(StoreError::Conflict("data/nav.yml".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }
}
