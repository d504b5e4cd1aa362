//! # Unified Request Errors
//!
//! Route handlers return `Result<T, AppError>`; the `IntoResponse` impl maps
//! each variant to a status code and keeps internal detail out of client
//! responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::mail::MailError;
use shop_core::ShopError;

/// Application-level error type for the storefront
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session load/store failed
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Order notification could not be sent
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Domain or gateway error
    #[error(transparent)]
    Shop(#[from] ShopError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Database(_) | Self::Session(_) | Self::Mail(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Shop(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Session(_) | Self::Mail(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for request handlers
pub type Result<T> = std::result::Result<T, AppError>;
