//! Board-specific data types
//!
//! View models served to the presentation layer and the request bodies it
//! sends back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared::{
    Bounds, ErrorCategory, Ranking, SheetId, Side, SortDirection, SyncError, SyncState, VisibilityState,
};

/// Geometry event that triggers a visibility recomputation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryChange {
    Scroll,
    Resize,
    Highlight,
    Ranking,
}

/// Highlighted row, resolved from the last search query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightTarget {
    pub index: Option<usize>,
    pub query: String,
}

impl HighlightTarget {
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve `query` against `ranking`; the first case-insensitive match wins
    pub fn resolve(query: &str, ranking: Option<&Ranking>) -> Self {
        let query = query.trim();
        let index = if query.is_empty() {
            None
        } else {
            ranking.and_then(|r| r.position_of(query))
        };

        Self {
            index,
            query: query.to_string(),
        }
    }

    pub fn is_set(&self) -> bool {
        self.index.is_some()
    }
}

/// Content shown in place of the highlighted row when it is out of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightOverlay {
    /// 1-based place in the ranking
    pub position: usize,
    pub name: String,
    pub score: String,
    pub side: Side,
}

/// One rendered ranking row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRow {
    pub place: usize,
    pub name: String,
    /// Raw score text as received from the feed
    pub score: String,
    pub notable: bool,
    pub podium: bool,
    pub highlighted: bool,
}

/// Classified error as displayed to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorView {
    pub category: ErrorCategory,
    pub message: String,
    pub detail: String,
    pub can_retry: bool,
    pub attempt: u32,
}

impl From<&SyncError> for ErrorView {
    fn from(error: &SyncError) -> Self {
        Self {
            category: error.category,
            message: error.message().to_string(),
            detail: error.detail.clone(),
            can_retry: error.can_retry,
            attempt: error.attempt,
        }
    }
}

/// Complete snapshot of the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub sheet: SheetId,
    pub direction: SortDirection,
    pub rows: Vec<BoardRow>,
    pub mean_score: f64,
    pub fetched_at: Option<DateTime<Utc>>,
    pub search: String,
    pub highlight_index: Option<usize>,
    pub sync: SyncState,
    pub error: Option<ErrorView>,
    /// Search, sheet selection and retry are disabled while loading
    pub controls_locked: bool,
    pub visibility: VisibilityState,
    pub overlay: Option<HighlightOverlay>,
}

/// `POST /api/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// `POST /api/source`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRequest {
    pub sheet: SheetId,
}

/// `POST /api/geometry`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryRequest {
    pub change: GeometryChange,
    pub container: Bounds,
    #[serde(default)]
    pub row: Option<Bounds>,
}

/// Visibility after a geometry event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryResponse {
    pub visibility: VisibilityState,
    /// Whether this event changed the visibility state
    pub changed: bool,
    pub overlay: Option<HighlightOverlay>,
}
