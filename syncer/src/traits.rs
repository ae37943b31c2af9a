//! Syncer trait definitions for dependency injection

use async_trait::async_trait;

use shared::{Entry, SheetId};
use crate::types::FetchFailure;

/// Fetch capability injected into the sync controller
///
/// Implementations perform exactly one request per call and report the raw
/// failure; classification happens in the controller.
#[mockall::automock]
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Fetch every row of one sheet, in feed order
    async fn fetch_rows(&self, sheet: &SheetId) -> Result<Vec<Entry>, FetchFailure>;
}
