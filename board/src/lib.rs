//! Live leaderboard board service
//!
//! Coordinates the sync controller, the ranking view and the highlight
//! visibility tracker, and exposes them to a UI layer over HTTP.

pub mod error;
pub mod types;
pub mod traits;
pub mod core;
pub mod board_impl;
pub mod web;

// Re-export main types
pub use error::{BoardError, BoardResult};
pub use board_impl::Board;
pub use crate::core::{Leaderboard, VisibilityTracker};
pub use types::*;
pub use traits::SyncControl;
