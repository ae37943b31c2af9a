//! Shared error types for the leaderboard workspace

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Serialization failed: {message}")]
    SerializationError { message: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Invalid bounds: top {top} exceeds bottom {bottom}")]
    InvalidBounds { top: f64, bottom: f64 },
}

impl From<serde_json::Error> for SharedError {
    fn from(e: serde_json::Error) -> Self {
        SharedError::SerializationError { message: e.to_string() }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
