use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::dtos::ErrorBody;

/// Server-side failures. Everything except `Unauthorized` collapses to a 500
/// carrying the underlying message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Database(#[from] diesel::result::Error),

    #[error("{0}")]
    Pool(String),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("{0}")]
    Payload(String),

    #[error("missing or invalid admin token")]
    Unauthorized,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl AppError {
    /// Wraps connection pool and `interact` failures, which carry no shared
    /// error type worth matching on.
    pub fn pool<E: std::fmt::Display>(err: E) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Payload(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
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
