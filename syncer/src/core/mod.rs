//! Core syncer logic: metric engine, failure classification and retry timing

pub mod classify;
pub mod metrics;
pub mod timer;

pub use classify::{backoff_delay, classify, classify_failure, next_retry};
pub use metrics::{is_entry_notable, is_notable, mean_score, parse_score, rank, sort_entries};
pub use timer::RetryTimer;
