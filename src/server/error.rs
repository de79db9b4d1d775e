//! Mapping from store failures to HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::store::StoreError;
use crate::types::{ApiEnvelope, ErrorDetail};

pub const NOT_FOUND_MESSAGE: &str = "Recipe not found";
pub const DUPLICATE_TITLE_MESSAGE: &str = "A recipe with this title already exists.";
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Recipe not found")]
    NotFound,

    #[error("Invalid recipe: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("A recipe with this title already exists.")]
    DuplicateTitle,

    #[error("Internal error: {0}")]
    Internal(#[source] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Validation(messages) => ApiError::Validation(messages),
            StoreError::DuplicateTitle => ApiError::DuplicateTitle,
            unavailable @ StoreError::Unavailable(_) => ApiError::Internal(unavailable),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorDetail::Message(NOT_FOUND_MESSAGE.to_string()),
            ),
            ApiError::Validation(messages) => {
                tracing::debug!("Rejecting recipe: {:?}", messages);
                (StatusCode::BAD_REQUEST, ErrorDetail::Messages(messages))
            }
            ApiError::DuplicateTitle => (
                StatusCode::BAD_REQUEST,
                ErrorDetail::Message(DUPLICATE_TITLE_MESSAGE.to_string()),
            ),
            ApiError::Internal(source) => {
                tracing::error!("Request failed: {}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetail::Message(SERVER_ERROR_MESSAGE.to_string()),
                )
            }
        };

        (status, Json(ApiEnvelope::<()>::failure(detail))).into_response()
    }
}
