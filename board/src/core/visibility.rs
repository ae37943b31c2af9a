//! Visibility tracker for the highlighted row
//!
//! Geometry comes from the presentation layer as scroll-axis bounds. The
//! tracker itself only remembers the last computed state.

use shared::{Bounds, Side, VisibilityState};

use crate::types::GeometryChange;

/// Whether `row` is fully inside `container`, and if not which edge it left by
///
/// No designated row means nothing to track, so the result is in view.
pub fn recompute(container: Bounds, row: Option<Bounds>) -> VisibilityState {
    let Some(row) = row else {
        return VisibilityState::in_view();
    };

    if row.top < container.top {
        VisibilityState::out_of_view(Side::Above)
    } else if row.bottom > container.bottom {
        VisibilityState::out_of_view(Side::Below)
    } else {
        VisibilityState::in_view()
    }
}

/// Holds the last visibility state and reports changes
#[derive(Debug, Clone, Default)]
pub struct VisibilityTracker {
    last: VisibilityState,
    last_change: Option<GeometryChange>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> VisibilityState {
        self.last
    }

    /// Event that produced the current state, if any
    pub fn last_change(&self) -> Option<GeometryChange> {
        self.last_change
    }

    /// Recompute for a geometry event; returns whether the state changed
    pub fn observe(&mut self, change: GeometryChange, container: Bounds, row: Option<Bounds>) -> bool {
        let next = recompute(container, row);
        self.last_change = Some(change);
        self.replace(next)
    }

    /// Forget the tracked row; returns whether the state changed
    pub fn reset(&mut self) -> bool {
        self.replace(VisibilityState::in_view())
    }

    fn replace(&mut self, next: VisibilityState) -> bool {
        let changed = next != self.last;
        self.last = next;
        changed
    }
}
