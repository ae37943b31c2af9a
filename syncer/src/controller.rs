//! Sync controller: periodic fetch, classified failures, backoff retries
//!
//! The controller runs as a single task that owns all sync state. Commands
//! from [`SyncHandle`], the polling interval, the retry timer and fetch
//! completions are multiplexed through one `select!` loop, so state changes
//! never interleave. Every fetch carries a token; completions whose token is
//! no longer current (superseded by a retry, a source change or a stop) are
//! discarded.

use std::future;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use shared::{
    ComponentId, RetryReason, SheetConfig, SyncConfig, SyncState, SyncUpdate, component_debug, component_info,
    component_warn,
};
use crate::core::{classify, metrics, next_retry, RetryTimer};
use crate::error::{SyncerError, SyncerResult};
use crate::traits::FeedClient;
use crate::types::FetchOutcome;

/// Fetch logic shared by the controller task and its in-flight requests
pub struct SyncController<F>
where
    F: FeedClient + 'static,
{
    feed: Arc<F>,
    config: SyncConfig,
}

impl<F> Clone for SyncController<F>
where
    F: FeedClient + 'static,
{
    fn clone(&self) -> Self {
        Self {
            feed: self.feed.clone(),
            config: self.config.clone(),
        }
    }
}

impl<F> SyncController<F>
where
    F: FeedClient + 'static,
{
    /// Create controller with an injected feed client
    pub fn new(feed: F, config: SyncConfig) -> Self {
        Self {
            feed: Arc::new(feed),
            config,
        }
    }

    /// Perform one request and turn it into a ranking or a classified failure
    pub async fn fetch_once(&self, sheet: &SheetConfig, attempt: u32) -> FetchOutcome {
        match self.feed.fetch_rows(&sheet.id).await {
            Ok(entries) => FetchOutcome::Success(metrics::rank(&entries, sheet.direction)),
            Err(failure) => {
                let error = classify(&failure, attempt, self.config.max_attempts);
                let retry = next_retry(&error, &self.config);
                FetchOutcome::Failed { error, retry }
            }
        }
    }

    /// Spawn the controller task
    ///
    /// Returns the control handle and the stream of snapshots. The task ends
    /// when [`SyncHandle::stop`] is called or every handle is dropped.
    pub fn spawn(self) -> (SyncHandle, mpsc::UnboundedReceiver<SyncUpdate>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        let sync_loop = SyncLoop::new(self, update_tx, completion_tx);
        tokio::spawn(sync_loop.run(command_rx, completion_rx));

        (SyncHandle { commands: command_tx }, update_rx)
    }
}

/// Commands accepted by the controller task
#[derive(Debug)]
enum ControlCommand {
    Start { sheet: SheetConfig },
    ChangeSource { sheet: SheetConfig },
    RetryNow,
    Stop { ack: oneshot::Sender<()> },
}

/// Cloneable handle used to drive a running controller
#[derive(Clone, Debug)]
pub struct SyncHandle {
    commands: mpsc::UnboundedSender<ControlCommand>,
}

impl SyncHandle {
    /// Fetch `sheet` now and then on every interval tick
    pub fn start(&self, sheet: SheetConfig) -> SyncerResult<()> {
        self.send(ControlCommand::Start { sheet })
    }

    /// Switch to another sheet, abandoning any retry chain and in-flight fetch
    pub fn change_source(&self, sheet: SheetConfig) -> SyncerResult<()> {
        self.send(ControlCommand::ChangeSource { sheet })
    }

    /// Skip any pending backoff and fetch again from attempt 1
    pub fn retry_now(&self) -> SyncerResult<()> {
        self.send(ControlCommand::RetryNow)
    }

    /// Stop polling; no update is emitted once this returns
    pub async fn stop(&self) -> SyncerResult<()> {
        let (ack, done) = oneshot::channel();
        self.send(ControlCommand::Stop { ack })?;
        done.await.map_err(|_| SyncerError::ControllerClosed)
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    fn send(&self, command: ControlCommand) -> SyncerResult<()> {
        self.commands.send(command).map_err(|_| SyncerError::ControllerClosed)
    }
}

/// Completion message from an in-flight fetch
struct Completion {
    token: u64,
    attempt: u32,
    reason: RetryReason,
    outcome: FetchOutcome,
}

/// State owned by the controller task
struct SyncLoop<F>
where
    F: FeedClient + 'static,
{
    controller: SyncController<F>,
    updates: mpsc::UnboundedSender<SyncUpdate>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    sheet: Option<SheetConfig>,
    state: SyncState,
    /// Token of the only fetch whose completion is accepted
    fetch_token: u64,
    in_flight: Option<JoinHandle<()>>,
    retry_timer: RetryTimer,
    interval: Option<Interval>,
}

impl<F> SyncLoop<F>
where
    F: FeedClient + 'static,
{
    fn new(
        controller: SyncController<F>,
        updates: mpsc::UnboundedSender<SyncUpdate>,
        completion_tx: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            controller,
            updates,
            completion_tx,
            sheet: None,
            state: SyncState::idle(),
            fetch_token: 0,
            in_flight: None,
            retry_timer: RetryTimer::new(),
            interval: None,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<ControlCommand>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        component_info!(ComponentId::Syncer, "🚀 Sync controller started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(ControlCommand::Stop { ack }) => {
                        self.halt();
                        let _ = ack.send(());
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => {
                        self.halt();
                        break;
                    }
                },

                Some(done) = completions.recv() => self.handle_completion(done),

                attempt = self.retry_timer.fired() => {
                    self.begin_fetch(attempt, RetryReason::Automatic);
                }

                _ = next_tick(&mut self.interval) => self.on_interval_tick(),
            }
        }

        component_info!(ComponentId::Syncer, "🛑 Sync controller stopped");
    }

    fn handle_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Start { sheet } => self.reset(sheet, RetryReason::Initial),
            ControlCommand::ChangeSource { sheet } => self.reset(sheet, RetryReason::SourceChange),
            ControlCommand::RetryNow => {
                if self.sheet.is_none() {
                    component_warn!(ComponentId::Syncer, "Manual retry ignored: no sheet selected");
                    return;
                }
                if self.retry_timer.cancel() {
                    component_debug!(ComponentId::Syncer, "Cancelled pending automatic retry");
                }
                self.begin_fetch(1, RetryReason::Manual);
            }
            ControlCommand::Stop { .. } => {}
        }
    }

    /// Select a sheet and restart polling from attempt 1
    fn reset(&mut self, sheet: SheetConfig, reason: RetryReason) {
        component_info!(
            ComponentId::Syncer,
            sheet = %sheet.id,
            direction = %sheet.direction,
            "📋 Syncing sheet"
        );

        self.retry_timer.cancel();
        self.abort_in_flight();

        let period = self.controller.config.interval;
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);

        self.sheet = Some(sheet);
        self.begin_fetch(1, reason);
    }

    fn on_interval_tick(&mut self) {
        if self.retry_timer.is_pending() || self.in_flight.is_some() {
            component_debug!(ComponentId::Syncer, "Interval tick skipped: fetch or retry pending");
            return;
        }
        self.begin_fetch(1, RetryReason::Interval);
    }

    /// Launch one fetch, superseding any in-flight request
    fn begin_fetch(&mut self, attempt: u32, reason: RetryReason) {
        let Some(sheet) = self.sheet.clone() else {
            return;
        };

        self.abort_in_flight();

        self.state = SyncState::loading(attempt, reason);
        self.publish(SyncUpdate::loading(sheet.id.clone(), self.state));

        let token = self.fetch_token;
        let controller = self.controller.clone();
        let completion_tx = self.completion_tx.clone();

        component_debug!(ComponentId::Syncer, sheet = %sheet.id, attempt, "Fetching feed");

        self.in_flight = Some(tokio::spawn(async move {
            let outcome = controller.fetch_once(&sheet, attempt).await;
            let _ = completion_tx.send(Completion {
                token,
                attempt,
                reason,
                outcome,
            });
        }));
    }

    fn handle_completion(&mut self, done: Completion) {
        if done.token != self.fetch_token {
            component_debug!(ComponentId::Syncer, attempt = done.attempt, "Discarding superseded response");
            return;
        }

        // Accept exactly one completion per token
        self.fetch_token += 1;
        self.in_flight = None;

        let Some(sheet) = self.sheet.clone() else {
            return;
        };

        match done.outcome {
            FetchOutcome::Success(ranking) => {
                self.retry_timer.cancel();
                self.state = SyncState::success(done.reason);

                component_info!(
                    ComponentId::Syncer,
                    sheet = %sheet.id,
                    entries = ranking.len(),
                    "✅ Ranking updated"
                );
                if ranking.is_empty() {
                    component_warn!(ComponentId::Syncer, sheet = %sheet.id, "Feed returned no participants");
                }

                self.publish(SyncUpdate {
                    sheet: sheet.id,
                    ranking: Some(ranking),
                    state: self.state,
                    error: None,
                });
            }
            FetchOutcome::Failed { error, retry } => {
                self.state = SyncState::failed(done.attempt, done.reason);

                component_warn!(
                    ComponentId::Syncer,
                    sheet = %sheet.id,
                    category = %error.category,
                    attempt = error.attempt,
                    can_retry = error.can_retry,
                    "⚠️ Fetch failed: {}",
                    error.detail
                );

                match retry {
                    Some(retry) => {
                        component_info!(
                            ComponentId::Syncer,
                            next_attempt = retry.attempt,
                            delay_ms = retry.delay.as_millis() as u64,
                            "Scheduling automatic retry"
                        );
                        self.retry_timer.schedule(retry.attempt, retry.delay);
                    }
                    None => {
                        self.retry_timer.cancel();
                    }
                }

                self.publish(SyncUpdate {
                    sheet: sheet.id,
                    ranking: None,
                    state: self.state,
                    error: Some(error),
                });
            }
        }
    }

    fn abort_in_flight(&mut self) {
        self.fetch_token += 1;
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    /// Cancel every timer and invalidate outstanding requests
    fn halt(&mut self) {
        self.retry_timer.cancel();
        self.abort_in_flight();
        self.interval = None;
        self.sheet = None;
    }

    fn publish(&self, update: SyncUpdate) {
        if self.updates.send(update).is_err() {
            component_debug!(ComponentId::Syncer, "No subscriber for sync update");
        }
    }
}

/// Next interval tick, or never when polling is not active
async fn next_tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => future::pending().await,
    }
}
