//! Error types shared across the service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Why the catalog could not be turned into a product table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found: {file}")]
    NotFound { file: String },

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not detect product_name/description among columns {columns:?}")]
    Unmappable { columns: Vec<String> },
}

/// Failure of a sentiment provider for a single text.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("sentiment provider unavailable: {0}")]
    Unavailable(String),
}

/// Errors a request handler can surface to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No data found on server")]
    NoData,

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoData => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status.as_u16(), "🔥 Request failed: {}", self);
        } else {
            tracing::warn!(status = %status.as_u16(), "⚠️ Request rejected: {}", self);
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
