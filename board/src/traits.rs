//! Trait definitions for dependency injection

use async_trait::async_trait;

use shared::SheetConfig;
use syncer::{SyncHandle, SyncerResult};

/// Control surface of a running sync controller
#[mockall::automock]
#[async_trait]
pub trait SyncControl: Send + Sync {
    /// Begin polling `sheet`
    fn start(&self, sheet: SheetConfig) -> SyncerResult<()>;

    /// Switch polling to another sheet
    fn change_source(&self, sheet: SheetConfig) -> SyncerResult<()>;

    /// Fetch again immediately from attempt 1
    fn retry_now(&self) -> SyncerResult<()>;

    /// Stop polling and wait for the controller to acknowledge
    async fn stop(&self) -> SyncerResult<()>;
}

#[async_trait]
impl SyncControl for SyncHandle {
    fn start(&self, sheet: SheetConfig) -> SyncerResult<()> {
        SyncHandle::start(self, sheet)
    }

    fn change_source(&self, sheet: SheetConfig) -> SyncerResult<()> {
        SyncHandle::change_source(self, sheet)
    }

    fn retry_now(&self) -> SyncerResult<()> {
        SyncHandle::retry_now(self)
    }

    async fn stop(&self) -> SyncerResult<()> {
        SyncHandle::stop(self).await
    }
}
