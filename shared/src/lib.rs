//! Shared types for the live leaderboard
//!
//! Contains the data model exchanged between the sync controller and the
//! coordination shell, plus configuration, errors and logging helpers used by
//! every crate in the workspace.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

pub use messages::{
    // Sync controller -> shell snapshots
    SyncUpdate,

    // Configuration types
    FeedConfig, SheetConfig, SyncConfig, BoardConfig,
};
