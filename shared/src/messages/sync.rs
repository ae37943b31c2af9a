//! Sync controller -> coordination shell messages

use serde::{Deserialize, Serialize};

use crate::types::{Ranking, SheetId, SyncError, SyncState};

/// One atomic snapshot emitted by the sync controller
///
/// `ranking` is only present when a fetch succeeded; on failure the shell keeps
/// showing the last good ranking alongside `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncUpdate {
    pub sheet: SheetId,
    pub ranking: Option<Ranking>,
    pub state: SyncState,
    pub error: Option<SyncError>,
}

impl SyncUpdate {
    pub fn loading(sheet: SheetId, state: SyncState) -> Self {
        Self {
            sheet,
            ranking: None,
            state,
            error: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
