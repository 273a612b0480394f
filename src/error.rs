//! Errors that cross the handler boundary and their HTTP mapping.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use std::time::Duration;

use crate::{config::ConfigError, repository::RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or path could not be decoded.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// The store was unreachable or the statement failed.
    #[error(transparent)]
    Infrastructure(#[from] RepositoryError),

    #[error("Store operation exceeded the {0:?} deadline")]
    Timeout(Duration),

    #[error("Note {0} not found")]
    NotFound(i64),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            Self::Configuration(e) => {
                tracing::error!("configuration error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server is misconfigured").into_response()
            }
            Self::Infrastructure(e) => {
                tracing::error!("storage error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to access the database")
                    .into_response()
            }
            Self::Timeout(deadline) => {
                tracing::error!("store operation timed out after {deadline:?}");
                (StatusCode::GATEWAY_TIMEOUT, "Database operation timed out").into_response()
            }
        }
    }
}
