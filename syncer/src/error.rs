//! Syncer error types

use thiserror::Error;

/// Result type for syncer operations
pub type SyncerResult<T> = Result<T, SyncerError>;

/// Syncer error types
#[derive(Error, Debug)]
pub enum SyncerError {
    #[error("Sync controller is no longer running")]
    ControllerClosed,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}
