//! Board-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use shared::{SharedError, SheetId};
use syncer::SyncerError;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Unknown sheet: {sheet}")]
    UnknownSheet { sheet: SheetId },

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server startup failed on {addr}: {message}")]
    ServerStartupFailed { addr: String, message: String },

    #[error("Sync controller error: {0}")]
    Syncer(#[from] SyncerError),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoardError {
    pub fn config(message: impl Into<String>) -> Self {
        BoardError::Config(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::UnknownSheet { .. } => StatusCode::NOT_FOUND,
            BoardError::InvalidRequest { .. } | BoardError::Shared(_) => StatusCode::BAD_REQUEST,
            BoardError::Syncer(SyncerError::ControllerClosed) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "status": "error",
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type BoardResult<T> = Result<T, BoardError>;
