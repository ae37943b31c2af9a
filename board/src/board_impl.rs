//! Main board implementation
//!
//! The `Board` service owns the shell state behind one lock, pumps sync
//! controller snapshots into it, and serves it over HTTP.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use shared::{
    BoardConfig, ComponentId, RetryReason, SheetConfig, SheetId, SyncStatus, SyncUpdate, component_debug, component_info,
    component_warn,
};
use crate::core::Leaderboard;
use crate::error::{BoardError, BoardResult};
use crate::traits::SyncControl;
use crate::types::{BoardView, GeometryRequest, GeometryResponse};
use crate::web::handlers::api;

/// Board service with an injected sync controller
pub struct Board<C>
where
    C: SyncControl + 'static,
{
    state: Arc<RwLock<Leaderboard>>,
    sync: Arc<C>,
    config: Arc<BoardConfig>,
    started_at: DateTime<Utc>,
}

impl<C> Clone for Board<C>
where
    C: SyncControl + 'static,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            sync: self.sync.clone(),
            config: self.config.clone(),
            started_at: self.started_at,
        }
    }
}

impl<C> Board<C>
where
    C: SyncControl + 'static,
{
    /// Create the board for a validated configuration; the first sheet is current
    pub fn new(config: &BoardConfig, sync: C) -> BoardResult<Self> {
        config.validate()?;
        let initial = config
            .initial_sheet()
            .cloned()
            .ok_or_else(|| BoardError::config("No sheet configured"))?;

        Ok(Self {
            state: Arc::new(RwLock::new(Leaderboard::new(initial))),
            sync: Arc::new(sync),
            config: Arc::new(config.clone()),
            started_at: Utc::now(),
        })
    }

    /// Start polling the current sheet
    pub async fn start(&self) -> BoardResult<()> {
        let mut state = self.state.write().await;
        let sheet = state.sheet().clone();
        self.sync.start(sheet.clone())?;
        state.begin_sequence(RetryReason::Initial);

        component_info!(ComponentId::Board, sheet = %sheet.id, "📋 Polling started");
        Ok(())
    }

    /// Apply every controller snapshot to the shell state until the stream ends
    pub fn spawn_update_pump(&self, mut updates: mpsc::UnboundedReceiver<SyncUpdate>) -> JoinHandle<()> {
        let state = self.state.clone();

        tokio::spawn(async move {
            while let Some(update) = updates.recv().await {
                let error = update.error.clone();
                let applied = state.write().await.apply_update(update);

                if let (true, Some(error)) = (applied, error) {
                    component_warn!(
                        ComponentId::Board,
                        category = %error.category,
                        attempt = error.attempt,
                        can_retry = error.can_retry,
                        "Sync error shown: {}",
                        error.message()
                    );
                }
            }

            component_debug!(ComponentId::Board, "Sync update stream closed");
        })
    }

    pub async fn view(&self) -> BoardView {
        self.state.read().await.view()
    }

    pub fn sheets(&self) -> &[SheetConfig] {
        &self.config.sheets
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub async fn search(&self, query: &str) -> BoardView {
        let mut state = self.state.write().await;
        let found = state.search(query);
        component_debug!(ComponentId::Board, query = %query.trim(), found = ?found, "Search");
        state.view()
    }

    /// Switch to a configured sheet; unknown ids are rejected
    pub async fn change_source(&self, sheet: &SheetId) -> BoardResult<BoardView> {
        let config = self
            .config
            .find_sheet(sheet)
            .cloned()
            .ok_or_else(|| BoardError::UnknownSheet { sheet: sheet.clone() })?;

        // Hold the lock so no snapshot for the new sheet lands before the switch
        let mut state = self.state.write().await;
        self.sync.change_source(config.clone())?;
        state.change_source(config);

        component_info!(ComponentId::Board, sheet = %sheet, "🔀 Sheet changed");
        Ok(state.view())
    }

    /// Fetch the current sheet again from attempt 1; rejected before `start`
    pub async fn retry_now(&self) -> BoardResult<BoardView> {
        let mut state = self.state.write().await;
        if state.sync_state().status == SyncStatus::Idle {
            return Err(BoardError::InvalidRequest {
                details: "polling has not started".to_string(),
            });
        }
        self.sync.retry_now()?;
        state.begin_sequence(RetryReason::Manual);

        component_info!(ComponentId::Board, sheet = %state.sheet().id, "🔁 Manual retry requested");
        Ok(state.view())
    }

    pub async fn observe_geometry(&self, request: GeometryRequest) -> BoardResult<GeometryResponse> {
        let container = request.container.validated()?;
        let row = request.row.map(|row| row.validated()).transpose()?;

        let mut state = self.state.write().await;
        let changed = state.observe_geometry(request.change, container, row);
        let view = state.view();

        Ok(GeometryResponse {
            visibility: view.visibility,
            changed,
            overlay: view.overlay,
        })
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/api/board", get(api::get_board::<C>))
            .route("/api/search", post(api::search::<C>))
            .route("/api/source", post(api::change_source::<C>))
            .route("/api/retry", post(api::retry::<C>))
            .route("/api/geometry", post(api::observe_geometry::<C>))
            .route("/api/sheets", get(api::list_sheets::<C>))
            .route("/health", get(api::health_check::<C>))
            .layer(
                ServiceBuilder::new()
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve HTTP until `shutdown` resolves, then stop the controller
    pub async fn run<S>(&self, addr: SocketAddr, shutdown: S) -> BoardResult<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| BoardError::ServerStartupFailed {
                addr: addr.to_string(),
                message: e.to_string(),
            })?;

        component_info!(ComponentId::Board, "🌐 Board listening on http://{}", addr);

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await?;

        self.shutdown().await
    }

    /// Stop the sync controller; snapshots still queued are dropped
    pub async fn shutdown(&self) -> BoardResult<()> {
        let mut state = self.state.write().await;
        let stopped = self.sync.stop().await;
        state.halt();
        stopped?;

        component_info!(ComponentId::Board, "🛑 Sync stopped");
        Ok(())
    }
}
