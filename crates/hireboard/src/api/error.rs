use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use super::pagination::PaginationError;
use super::ApiResponse;
use crate::storage::RepositoryError;

/// HTTP-facing error. Internal details are logged, never returned.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> Cow<'_, str> {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg) => Cow::Borrowed(msg.as_str()),
            ApiError::Internal(_) => Cow::Borrowed("internal server error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, error = %self, "api_error");
        } else {
            warn!(status = %status, error = %self, "api_rejection");
        }

        let body = ApiResponse::failure(self.public_message().into_owned());
        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ApiError::NotFound("record not found".into()),
            RepositoryError::Conflict => ApiError::BadRequest("record already exists".into()),
            RepositoryError::Unavailable(_) => ApiError::Internal(value.to_string()),
        }
    }
}

impl From<PaginationError> for ApiError {
    fn from(value: PaginationError) -> Self {
        ApiError::BadRequest(value.to_string())
    }
}
