use std::time::Duration;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("You are not logged in, please provide token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    /// Covers both a missing note and a note owned by someone else.
    #[error("Note not found or unauthorized")]
    NoteNotFound,

    #[error("Invalid note id: {0:?}")]
    InvalidId(String),

    #[error("{0}")]
    Validation(String),

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Storage call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Error while hashing password: {0}")]
    Hash(String),

    #[error("Error while signing token: {0}")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::NoteNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidId(_)
            | AppError::Validation(_)
            | AppError::EmailTaken
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Timeout(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Database(_)
            | AppError::Hash(_)
            | AppError::TokenEncoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            error!("{self}");
            match self {
                AppError::Timeout(_) => "Storage is unavailable, try again".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };

        let body = json!({
            "success": false,
            "message": message,
        });
        (status, Json(body)).into_response()
    }
}
