//! Error types for the Image OCR server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::note::NoteError;
use crate::settings::SettingsError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// OCR failures are not represented here: they travel as `OcrResult` data.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Note error: {0}")]
    Note(#[from] NoteError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Settings(e) => {
                tracing::error!("Settings error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "settings_error",
                    "Failed to persist settings".to_string(),
                )
            }
            AppError::Note(NoteError::AlreadyExists(name)) => (
                StatusCode::CONFLICT,
                "conflict",
                format!("Note already exists: {}", name),
            ),
            AppError::Note(e) => {
                tracing::error!("Note error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "Failed to create note".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
