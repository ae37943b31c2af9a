//! Coordination shell state
//!
//! Pure state with no I/O. Holds the current sheet, the last good ranking, the
//! highlight, the sync lifecycle and the visibility tracker, and renders them
//! into a [`BoardView`].

use shared::{Bounds, ComponentId, Ranking, RetryReason, SheetConfig, SyncError, SyncState, SyncUpdate, component_debug};
use syncer::core::is_entry_notable;

use crate::core::visibility::VisibilityTracker;
use crate::types::{BoardRow, BoardView, ErrorView, GeometryChange, HighlightOverlay, HighlightTarget};

/// Places that get podium styling
const PODIUM_PLACES: usize = 3;

pub struct Leaderboard {
    sheet: SheetConfig,
    ranking: Option<Ranking>,
    highlight: HighlightTarget,
    sync_state: SyncState,
    error: Option<SyncError>,
    visibility: VisibilityTracker,
    halted: bool,
}

impl Leaderboard {
    pub fn new(sheet: SheetConfig) -> Self {
        Self {
            sheet,
            ranking: None,
            highlight: HighlightTarget::none(),
            sync_state: SyncState::idle(),
            error: None,
            visibility: VisibilityTracker::new(),
            halted: false,
        }
    }

    pub fn sheet(&self) -> &SheetConfig {
        &self.sheet
    }

    pub fn ranking(&self) -> Option<&Ranking> {
        self.ranking.as_ref()
    }

    pub fn highlight(&self) -> &HighlightTarget {
        &self.highlight
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync_state
    }

    pub fn error(&self) -> Option<&SyncError> {
        self.error.as_ref()
    }

    pub fn controls_locked(&self) -> bool {
        self.sync_state.is_loading()
    }

    /// Replace the synced fields with one controller snapshot
    ///
    /// Snapshots for a sheet other than the current one are ignored. A
    /// snapshot without a ranking keeps the last good one on display. A new
    /// ranking drops the visibility state until fresh geometry arrives.
    /// Returns whether the snapshot was applied.
    pub fn apply_update(&mut self, update: SyncUpdate) -> bool {
        if self.halted {
            component_debug!(ComponentId::Board, sheet = %update.sheet, "Ignoring update after shutdown");
            return false;
        }

        if update.sheet != self.sheet.id {
            component_debug!(
                ComponentId::Board,
                sheet = %update.sheet,
                current = %self.sheet.id,
                "Ignoring update for inactive sheet"
            );
            return false;
        }

        if let Some(ranking) = update.ranking {
            self.highlight = HighlightTarget::resolve(&self.highlight.query, Some(&ranking));
            self.ranking = Some(ranking);
            self.visibility.reset();
        }

        self.sync_state = update.state;
        self.error = update.error;
        true
    }

    /// Highlight the first entry whose name matches `query`
    ///
    /// An empty or absent name clears the highlight and the overlay. Moving
    /// the highlight to another row drops the geometry measured for the old one.
    pub fn search(&mut self, query: &str) -> Option<usize> {
        let previous = self.highlight.index;
        self.highlight = HighlightTarget::resolve(query, self.ranking.as_ref());
        if !self.highlight.is_set() || self.highlight.index != previous {
            self.visibility.reset();
        }
        self.highlight.index
    }

    /// Select another sheet
    ///
    /// Clears highlight, search text and error, and shows the first attempt
    /// of the new sequence as loading.
    pub fn change_source(&mut self, sheet: SheetConfig) {
        self.sheet = sheet;
        self.highlight = HighlightTarget::none();
        self.visibility.reset();
        self.begin_sequence(RetryReason::SourceChange);
    }

    /// Stop accepting controller snapshots
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Show the fetch sequence restarted from attempt 1
    pub fn begin_sequence(&mut self, reason: RetryReason) {
        self.error = None;
        self.sync_state = SyncState::loading(1, reason);
    }

    /// Feed a geometry event to the visibility tracker
    ///
    /// Without a highlighted row the supplied row bounds are ignored. Returns
    /// whether the visibility state changed.
    pub fn observe_geometry(&mut self, change: GeometryChange, container: Bounds, row: Option<Bounds>) -> bool {
        let row = if self.highlight.is_set() { row } else { None };
        self.visibility.observe(change, container, row)
    }

    /// Overlay content while the highlighted row is out of view
    pub fn overlay(&self) -> Option<HighlightOverlay> {
        let visibility = self.visibility.state();
        let side = visibility.side.filter(|_| visibility.out_of_view)?;
        let index = self.highlight.index?;
        let entry = self.ranking.as_ref()?.get(index)?;

        Some(HighlightOverlay {
            position: index + 1,
            name: entry.name.clone(),
            score: entry.score.clone(),
            side,
        })
    }

    pub fn view(&self) -> BoardView {
        let rows = self
            .ranking
            .as_ref()
            .map(|ranking| {
                ranking
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| BoardRow {
                        place: index + 1,
                        name: entry.name.clone(),
                        score: entry.score.clone(),
                        notable: is_entry_notable(entry, ranking),
                        podium: index < PODIUM_PLACES,
                        highlighted: self.highlight.index == Some(index),
                    })
                    .collect()
            })
            .unwrap_or_default();

        BoardView {
            sheet: self.sheet.id.clone(),
            direction: self.sheet.direction,
            rows,
            mean_score: self.ranking.as_ref().map_or(0.0, |r| r.mean_score),
            fetched_at: self.ranking.as_ref().map(|r| r.fetched_at),
            search: self.highlight.query.clone(),
            highlight_index: self.highlight.index,
            sync: self.sync_state,
            error: self.error.as_ref().map(ErrorView::from),
            controls_locked: self.controls_locked(),
            visibility: self.visibility.state(),
            overlay: self.overlay(),
        }
    }
}
