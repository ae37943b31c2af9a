//! REST API handlers
//!
//! HTTP endpoints exposing the board view and its controls

use axum::{extract::State, response::Json};
use chrono::Utc;
use serde_json::{json, Value};

use shared::SheetConfig;
use crate::board_impl::Board;
use crate::error::BoardResult;
use crate::traits::SyncControl;
use crate::types::{BoardView, GeometryRequest, GeometryResponse, SearchRequest, SourceRequest};

/// Current board snapshot - GET /api/board
pub async fn get_board<C>(State(board): State<Board<C>>) -> Json<BoardView>
where
    C: SyncControl + 'static,
{
    Json(board.view().await)
}

/// Highlight a participant - POST /api/search
pub async fn search<C>(State(board): State<Board<C>>, Json(request): Json<SearchRequest>) -> Json<BoardView>
where
    C: SyncControl + 'static,
{
    Json(board.search(&request.query).await)
}

/// Select another sheet - POST /api/source
pub async fn change_source<C>(
    State(board): State<Board<C>>,
    Json(request): Json<SourceRequest>,
) -> BoardResult<Json<BoardView>>
where
    C: SyncControl + 'static,
{
    board.change_source(&request.sheet).await.map(Json)
}

/// Manual retry - POST /api/retry
pub async fn retry<C>(State(board): State<Board<C>>) -> BoardResult<Json<BoardView>>
where
    C: SyncControl + 'static,
{
    board.retry_now().await.map(Json)
}

/// Scroll, resize, highlight or ranking geometry - POST /api/geometry
pub async fn observe_geometry<C>(
    State(board): State<Board<C>>,
    Json(request): Json<GeometryRequest>,
) -> BoardResult<Json<GeometryResponse>>
where
    C: SyncControl + 'static,
{
    board.observe_geometry(request).await.map(Json)
}

/// Configured sheet catalog - GET /api/sheets
pub async fn list_sheets<C>(State(board): State<Board<C>>) -> Json<Vec<SheetConfig>>
where
    C: SyncControl + 'static,
{
    Json(board.sheets().to_vec())
}

/// Health check endpoint
pub async fn health_check<C>(State(board): State<Board<C>>) -> Json<Value>
where
    C: SyncControl + 'static,
{
    let view = board.view().await;
    let now = Utc::now();

    Json(json!({
        "status": "healthy",
        "timestamp": now.timestamp(),
        "uptime": (now - board.started_at()).num_seconds(),
        "sheet": view.sheet,
        "sync": view.sync.status,
    }))
}
