//! Core types used throughout the leaderboard workspace

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod geometry;
pub mod ranking;
pub mod sync;

pub use geometry::{Bounds, Side, VisibilityState};
pub use ranking::{Entry, Ranking, SortDirection};
pub use sync::{ErrorCategory, RetryReason, SyncError, SyncState, SyncStatus};

/// Component identifier attached to every log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentId {
    /// Feed polling and retry state machine
    Syncer,
    /// Coordination shell and HTTP boundary
    Board,
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Syncer => write!(f, "syncer"),
            ComponentId::Board => write!(f, "board"),
        }
    }
}

/// Identifier of one sheet (tab) of the remote spreadsheet
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetId(String);

impl SheetId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SheetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
