use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::birth::BirthError;
use crate::charts::SelectionError;
use crate::client::GeocodeError;
use crate::report::ArtifactError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("payload invalid: {0}")]
    InvalidPayload(String),
    #[error("{0}")]
    InvalidSelection(#[from] SelectionError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPayload(_) | ApiError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidPayload(_) => "INVALID_PAYLOAD",
            ApiError::InvalidSelection(_) => "INVALID_SELECTION",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            code: self.code(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<BirthError> for ApiError {
    fn from(value: BirthError) -> Self {
        ApiError::InvalidPayload(value.to_string())
    }
}

impl From<GeocodeError> for ApiError {
    fn from(value: GeocodeError) -> Self {
        match value {
            GeocodeError::EmptyInput => ApiError::InvalidPayload(value.to_string()),
            GeocodeError::NoMatch(_) => ApiError::NotFound(value.to_string()),
            GeocodeError::Request(_) => ApiError::Upstream(value.to_string()),
        }
    }
}

impl From<ArtifactError> for ApiError {
    fn from(value: ArtifactError) -> Self {
        ApiError::Internal(value.to_string())
    }
}
