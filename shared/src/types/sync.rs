//! Fetch lifecycle and error classification types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of the latest fetch attempt sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Idle,
    Loading,
    Success,
    Failed,
}

/// What triggered the current attempt sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryReason {
    /// First fetch after start
    Initial,
    /// Ambient polling tick
    Interval,
    /// Backoff timer fired after a failed attempt
    Automatic,
    /// User asked for a retry
    Manual,
    /// Sheet selection changed
    SourceChange,
}

/// Sync lifecycle snapshot: status, attempt number and trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    pub status: SyncStatus,
    /// 1..=max during a sequence, 0 after success or before the first fetch
    pub attempt: u32,
    pub retry_reason: RetryReason,
}

impl SyncState {
    pub fn idle() -> Self {
        Self {
            status: SyncStatus::Idle,
            attempt: 0,
            retry_reason: RetryReason::Initial,
        }
    }

    pub fn loading(attempt: u32, retry_reason: RetryReason) -> Self {
        Self {
            status: SyncStatus::Loading,
            attempt,
            retry_reason,
        }
    }

    pub fn success(retry_reason: RetryReason) -> Self {
        Self {
            status: SyncStatus::Success,
            attempt: 0,
            retry_reason,
        }
    }

    pub fn failed(attempt: u32, retry_reason: RetryReason) -> Self {
        Self {
            status: SyncStatus::Failed,
            attempt,
            retry_reason,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == SyncStatus::Loading
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::idle()
    }
}

/// User-facing failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    /// Request never reached the server
    Connectivity,
    /// HTTP 429
    RateLimited,
    /// HTTP 404, usually a missing sheet
    NotFound,
    /// HTTP 5xx
    ServerError,
    /// Body did not contain a usable `rows` array
    InvalidFormat,
    /// Automatic retry budget spent
    Exhausted,
    /// Any other non-2xx status
    UnexpectedStatus,
}

impl ErrorCategory {
    /// Stable machine tag
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Connectivity => "connectivity",
            ErrorCategory::RateLimited => "rate-limited",
            ErrorCategory::NotFound => "not-found",
            ErrorCategory::ServerError => "server-error",
            ErrorCategory::InvalidFormat => "invalid-format",
            ErrorCategory::Exhausted => "exhausted",
            ErrorCategory::UnexpectedStatus => "unexpected-status",
        }
    }

    /// Short message suitable for display
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorCategory::Connectivity => "Network connection error",
            ErrorCategory::RateLimited => "Request limit exceeded, try again later",
            ErrorCategory::NotFound => "Data not found: the selected sheet may not exist",
            ErrorCategory::ServerError => "The data server returned an error",
            ErrorCategory::InvalidFormat => "Invalid data format received",
            ErrorCategory::Exhausted => "Unable to load data after several attempts",
            ErrorCategory::UnexpectedStatus => "Unexpected response from the data server",
        }
    }

    /// Whether the controller schedules a backoff retry for this category
    pub fn is_auto_retried(self) -> bool {
        matches!(
            self,
            ErrorCategory::Connectivity
                | ErrorCategory::NotFound
                | ErrorCategory::ServerError
                | ErrorCategory::InvalidFormat
        )
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified fetch failure as surfaced to the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncError {
    pub category: ErrorCategory,
    /// Whether a manual retry is offered
    pub can_retry: bool,
    /// Technical detail (status line, transport error, payload problem)
    pub detail: String,
    /// Attempt number that produced this failure
    pub attempt: u32,
    /// Category of the last underlying failure when `category` is `Exhausted`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<ErrorCategory>,
}

impl SyncError {
    pub fn message(&self) -> &'static str {
        self.category.user_message()
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (attempt {}): {}",
            self.category, self.attempt, self.detail
        )
    }
}
