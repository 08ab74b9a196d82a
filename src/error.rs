//! Error types for the surf-climate application.
//!
//! Every failure a request can run into is a [`ClimateError`]; the
//! [`IntoResponse`] impl below decides which HTTP status and JSON body the
//! client sees.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Body returned for failures that must not leak storage details.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The main error type for surf-climate operations.
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Database errors (connection, query or decode failures)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A date range whose start lies after its end
    #[error("{message}")]
    InvalidRange { message: String },

    /// An aggregate query that legitimately matched no rows
    #[error("{message}")]
    NotFound { message: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl ClimateError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClimateError::InvalidRange { .. } => StatusCode::BAD_REQUEST,
            ClimateError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client.
    pub fn public_message(&self) -> String {
        match self {
            ClimateError::InvalidRange { message } | ClimateError::NotFound { message } => {
                message.clone()
            }
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ClimateError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(serde_json::json!({ "error": self.public_message() })),
        )
            .into_response()
    }
}

/// Convenience type alias for Results with ClimateError
pub type Result<T> = std::result::Result<T, ClimateError>;
