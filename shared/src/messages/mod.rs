//! Message and configuration types for the leaderboard workspace
//!
//! - `sync`: snapshots emitted by the sync controller to the coordination shell
//! - `config`: feed, sheet, polling and server configuration

pub mod sync;
pub mod config;

pub use sync::SyncUpdate;

pub use config::{BoardConfig, FeedConfig, SheetConfig, SyncConfig};
