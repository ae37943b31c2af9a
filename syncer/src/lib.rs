//! Feed synchronization library for the live leaderboard
//!
//! Polls the remote tabular feed on an interval, ranks each snapshot with the
//! metric engine, classifies failures and retries them with exponential backoff.

pub mod error;
pub mod types;
pub mod traits;
pub mod core;
pub mod controller;
pub mod services;

// Re-export main types
pub use error::{SyncerError, SyncerResult};
pub use types::*;
pub use traits::*;
pub use controller::{SyncController, SyncHandle};
pub use services::*;
