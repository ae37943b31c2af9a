//! Syncer-specific data types

use std::fmt;
use std::time::Duration;

use shared::{Ranking, SyncError};

/// Raw failure of one feed request, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The request never reached the server (DNS, refused, timeout)
    Transport(String),
    /// The server answered with a non-2xx status
    HttpStatus { status: u16, reason: String },
    /// The body was not JSON or had no usable `rows` array
    InvalidPayload(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport(message) => write!(f, "transport error: {message}"),
            FetchFailure::HttpStatus { status, reason } if reason.is_empty() => write!(f, "HTTP {status}"),
            FetchFailure::HttpStatus { status, reason } => write!(f, "HTTP {status} {reason}"),
            FetchFailure::InvalidPayload(message) => write!(f, "invalid payload: {message}"),
        }
    }
}

/// Automatic retry planned after a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRetry {
    /// Attempt number the retry will run as
    pub attempt: u32,
    pub delay: Duration,
}

/// Result of a single fetch attempt
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Ranking),
    Failed {
        error: SyncError,
        retry: Option<ScheduledRetry>,
    },
}
