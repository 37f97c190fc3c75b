//! HTTP error mapping

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use data_validator::ValidationError;
use serde_json::json;
use storage::StorageError;
use thiserror::Error;

/// Errors returned by route handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Body or query string the extractors could not decode
    #[error("{message}")]
    Malformed { status: StatusCode, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Storage(StorageError::NotFound { .. }) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Storage(StorageError::InvalidReading(_)) | ApiError::Validation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            // Well-formed JSON with missing or mistyped fields
            ApiError::Malformed { status, .. } if *status == StatusCode::UNPROCESSABLE_ENTITY => {
                (*status, "VALIDATION_ERROR")
            }
            ApiError::Malformed { status, .. } => (*status, "BAD_REQUEST"),
        };

        (status, Json(json!({ "error": self.to_string(), "code": code }))).into_response()
    }
}
