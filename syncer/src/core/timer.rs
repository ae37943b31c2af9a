//! Single-slot retry timer
//!
//! Holds at most one pending automatic retry. Scheduling again replaces the
//! pending retry; cancelling drops it so it never fires.

use std::future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::{self, Sleep};

struct PendingRetry {
    attempt: u32,
    sleep: Pin<Box<Sleep>>,
}

/// Schedule, cancel and reschedule one pending retry
#[derive(Default)]
pub struct RetryTimer {
    pending: Option<PendingRetry>,
}

impl RetryTimer {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `attempt` to run after `delay`, replacing any pending retry
    pub fn schedule(&mut self, attempt: u32, delay: Duration) {
        self.pending = Some(PendingRetry {
            attempt,
            sleep: Box::pin(time::sleep(delay)),
        });
    }

    /// Drop the pending retry; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_attempt(&self) -> Option<u32> {
        self.pending.as_ref().map(|p| p.attempt)
    }

    /// Resolve with the attempt number once the pending retry is due
    ///
    /// Never resolves while nothing is scheduled. Cancel safe: dropping the
    /// future leaves the pending retry in place.
    pub async fn fired(&mut self) -> u32 {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.sleep.as_mut().await;
                let attempt = pending.attempt;
                self.pending = None;
                attempt
            }
            None => future::pending().await,
        }
    }
}
