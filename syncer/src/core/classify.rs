//! Failure classification and retry planning
//!
//! Classification inspects the raw failure (status code, payload shape,
//! transport error) and never the rendered message text.

use std::time::Duration;

use shared::{ErrorCategory, SyncConfig, SyncError};
use crate::types::{FetchFailure, ScheduledRetry};

/// Map a raw failure to its category, first match wins
pub fn classify_failure(failure: &FetchFailure) -> ErrorCategory {
    match failure {
        FetchFailure::Transport(_) => ErrorCategory::Connectivity,
        FetchFailure::HttpStatus { status: 429, .. } => ErrorCategory::RateLimited,
        FetchFailure::HttpStatus { status: 404, .. } => ErrorCategory::NotFound,
        FetchFailure::HttpStatus { status, .. } if (500..=599).contains(status) => ErrorCategory::ServerError,
        FetchFailure::HttpStatus { .. } => ErrorCategory::UnexpectedStatus,
        FetchFailure::InvalidPayload(_) => ErrorCategory::InvalidFormat,
    }
}

/// Classify a failure observed on `attempt`
///
/// An automatically retried category that fails on the last allowed attempt
/// becomes `Exhausted` and can no longer be retried from the UI.
pub fn classify(failure: &FetchFailure, attempt: u32, max_attempts: u32) -> SyncError {
    let category = classify_failure(failure);
    let detail = failure.to_string();

    if category.is_auto_retried() && attempt >= max_attempts {
        return SyncError {
            category: ErrorCategory::Exhausted,
            can_retry: false,
            detail,
            attempt,
            cause: Some(category),
        };
    }

    SyncError {
        category,
        can_retry: true,
        detail,
        attempt,
        cause: None,
    }
}

/// Delay before retrying after `attempt` failed: `2^attempt * base`
pub fn backoff_delay(attempt: u32, base: Duration) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

/// Plan the automatic retry for a classified failure, if any
pub fn next_retry(error: &SyncError, config: &SyncConfig) -> Option<ScheduledRetry> {
    if !error.category.is_auto_retried() || error.attempt >= config.max_attempts {
        return None;
    }

    Some(ScheduledRetry {
        attempt: error.attempt + 1,
        delay: backoff_delay(error.attempt, config.backoff_base),
    })
}
