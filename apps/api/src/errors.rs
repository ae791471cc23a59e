#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File exceeds the upload size limit")]
    FileTooLarge,

    #[error("Malformed multipart form: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Login failures keep the `{success, message}` body shape the
            // frontend consumes, distinct from the error envelope below.
            AppError::InvalidCredentials => {
                let body = Json(json!({
                    "success": false,
                    "message": "Invalid email or password"
                }));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFileType(declared) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_FILE_TYPE",
                format!("Only PDF or Word documents are accepted (got {declared})"),
            ),
            AppError::FileTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "FILE_TOO_LARGE",
                "Uploads are limited to 5 MiB".to_string(),
            ),
            AppError::Multipart(e) => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_FORM",
                format!("Could not read multipart form: {e}"),
            ),
            AppError::Credential(msg) => {
                tracing::error!("Credential error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CREDENTIAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
