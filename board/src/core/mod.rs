//! Core board logic: pure state, no I/O

pub mod leaderboard;
pub mod visibility;

pub use leaderboard::Leaderboard;
pub use visibility::{recompute, VisibilityTracker};

#[cfg(test)]
mod tests;
