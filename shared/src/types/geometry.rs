//! Scroll-axis geometry supplied by the presentation layer

use serde::{Deserialize, Serialize};

use crate::errors::{SharedError, SharedResult};

/// Leading and trailing edge of a box along the scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Reject boxes whose edges are inverted or not finite
    pub fn validated(self) -> SharedResult<Self> {
        if !self.top.is_finite() || !self.bottom.is_finite() || self.top > self.bottom {
            return Err(SharedError::InvalidBounds {
                top: self.top,
                bottom: self.bottom,
            });
        }
        Ok(self)
    }
}

/// Edge the highlighted row exited through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Above,
    Below,
}

/// Whether the highlighted row is out of its container's viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityState {
    pub out_of_view: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
}

impl VisibilityState {
    pub fn in_view() -> Self {
        Self {
            out_of_view: false,
            side: None,
        }
    }

    pub fn out_of_view(side: Side) -> Self {
        Self {
            out_of_view: true,
            side: Some(side),
        }
    }
}

impl Default for VisibilityState {
    fn default() -> Self {
        Self::in_view()
    }
}
