//! HTTP API tests for the board router

mod fixtures;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use tokio::sync::mpsc;

use board::traits::MockSyncControl;
use board::Board;
use fixtures::*;
use shared::{ErrorCategory, RetryReason, SyncError, SyncState, SyncStatus, SyncUpdate};
use syncer::SyncerError;

/// Board whose shell state already shows the first sheet's ranking
async fn loaded_board(control: MockSyncControl) -> Board<MockSyncControl> {
    let board = Board::new(&test_config(), control).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    board.spawn_update_pump(rx);
    tx.send(rubiks_update()).unwrap();

    let ready = wait_for_condition(
        || {
            let board = board.clone();
            async move { !board.view().await.rows.is_empty() }
        },
        Duration::from_secs(2),
    )
    .await;
    assert!(ready, "ranking never applied");

    board
}

#[tokio::test]
async fn test_board_starts_empty_on_first_sheet() {
    let board = Board::new(&test_config(), accepting_control()).unwrap();

    let (status, body) = send(board.build_router(), get("/api/board")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sheet"], "Rubiks1");
    assert_eq!(body["direction"], "ascending");
    assert_eq!(body["rows"], json!([]));
    assert_eq!(body["sync"]["status"], "idle");
}

#[tokio::test]
async fn test_start_marks_initial_loading() {
    let mut control = MockSyncControl::new();
    control
        .expect_start()
        .withf(|sheet| sheet.id.as_str() == "Rubiks1")
        .times(1)
        .returning(|_| Ok(()));
    let board = Board::new(&test_config(), control).unwrap();

    board.start().await.unwrap();

    let view = board.view().await;
    assert!(view.controls_locked);
    assert_eq!(view.sync.attempt, 1);
    assert_eq!(view.sync.retry_reason, RetryReason::Initial);
}

#[tokio::test]
async fn test_board_view_rows() {
    let board = loaded_board(accepting_control()).await;

    let (status, body) = send(board.build_router(), get("/api/board")).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    let names: Vec<_> = rows.iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Bob", "Alice", "Dan", "Carol"]);

    assert_eq!(rows[0]["place"], 1);
    assert_eq!(rows[0]["score"], "9.1");
    assert_eq!(rows[0]["notable"], true);
    assert_eq!(rows[0]["podium"], true);
    assert_eq!(rows[2]["notable"], false);
    assert_eq!(rows[3]["podium"], false);
    assert_eq!(body["controls_locked"], false);
}

#[tokio::test]
async fn test_search_highlights_row() {
    let board = loaded_board(accepting_control()).await;

    let (status, body) = send(board.build_router(), post_json("/api/search", json!({ "query": "DAN" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["highlight_index"], 2);
    assert_eq!(body["rows"][2]["highlighted"], true);
    assert_eq!(body["search"], "DAN");
}

#[tokio::test]
async fn test_search_absent_name_clears_highlight() {
    let board = loaded_board(accepting_control()).await;
    send(board.build_router(), post_json("/api/search", json!({ "query": "Carol" }))).await;

    let (_, body) = send(board.build_router(), post_json("/api/search", json!({ "query": "Zed" }))).await;

    assert_eq!(body["highlight_index"], json!(null));
    assert_eq!(body["visibility"]["out_of_view"], false);
    assert_eq!(body["overlay"], json!(null));
}

#[tokio::test]
async fn test_geometry_reports_overlay_for_hidden_row() {
    let board = loaded_board(accepting_control()).await;
    send(board.build_router(), post_json("/api/search", json!({ "query": "carol" }))).await;

    let request = json!({
        "change": "scroll",
        "container": { "top": 0.0, "bottom": 500.0 },
        "row": { "top": 600.0, "bottom": 620.0 }
    });
    let (status, body) = send(board.build_router(), post_json("/api/geometry", request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], true);
    assert_eq!(body["visibility"], json!({ "out_of_view": true, "side": "below" }));
    assert_eq!(body["overlay"]["position"], 4);
    assert_eq!(body["overlay"]["name"], "Carol");
    assert_eq!(body["overlay"]["score"], "20.0");
}

#[tokio::test]
async fn test_geometry_row_in_view() {
    let board = loaded_board(accepting_control()).await;
    send(board.build_router(), post_json("/api/search", json!({ "query": "bob" }))).await;

    let request = json!({
        "change": "resize",
        "container": { "top": 0.0, "bottom": 500.0 },
        "row": { "top": 100.0, "bottom": 120.0 }
    });
    let (_, body) = send(board.build_router(), post_json("/api/geometry", request)).await;

    assert_eq!(body["changed"], false);
    assert_eq!(body["visibility"], json!({ "out_of_view": false }));
}

#[tokio::test]
async fn test_geometry_rejects_inverted_bounds() {
    let board = loaded_board(accepting_control()).await;

    let request = json!({
        "change": "scroll",
        "container": { "top": 500.0, "bottom": 0.0 },
        "row": null
    });
    let (status, body) = send(board.build_router(), post_json("/api/geometry", request)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_change_source_resets_shell_state() {
    let mut control = MockSyncControl::new();
    control
        .expect_change_source()
        .withf(|sheet| sheet.id.as_str() == "Points")
        .times(1)
        .returning(|_| Ok(()));
    let board = loaded_board(control).await;
    send(board.build_router(), post_json("/api/search", json!({ "query": "Bob" }))).await;

    let (status, body) = send(board.build_router(), post_json("/api/source", json!({ "sheet": "Points" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sheet"], "Points");
    assert_eq!(body["direction"], "descending");
    assert_eq!(body["highlight_index"], json!(null));
    assert_eq!(body["search"], "");
    assert_eq!(body["error"], json!(null));
    assert_eq!(body["sync"]["attempt"], 1);
    assert_eq!(body["sync"]["retry_reason"], "source_change");
    assert_eq!(body["controls_locked"], true);
}

#[tokio::test]
async fn test_change_source_rejects_unknown_sheet() {
    let mut control = MockSyncControl::new();
    control.expect_change_source().times(0);
    let board = Board::new(&test_config(), control).unwrap();

    let (status, body) = send(board.build_router(), post_json("/api/source", json!({ "sheet": "Chess" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Unknown sheet: Chess");
    assert_eq!(board.view().await.sheet.as_str(), "Rubiks1");
}

#[tokio::test]
async fn test_stale_sheet_updates_are_ignored_after_switch() {
    let board = Board::new(&test_config(), accepting_control()).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    board.spawn_update_pump(rx);

    board.change_source(&"Points".into()).await.unwrap();
    tx.send(rubiks_update()).unwrap();
    tx.send(success_update(&test_config().sheets[1], &[("Zed", "3")])).unwrap();

    let ready = wait_for_condition(
        || {
            let board = board.clone();
            async move { !board.view().await.rows.is_empty() }
        },
        Duration::from_secs(2),
    )
    .await;
    assert!(ready);

    let view = board.view().await;
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].name, "Zed");
}

#[tokio::test]
async fn test_retry_clears_error_and_locks_controls() {
    let mut control = MockSyncControl::new();
    control.expect_retry_now().times(1).returning(|| Ok(()));
    let board = Board::new(&test_config(), control).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    board.spawn_update_pump(rx);

    tx.send(SyncUpdate {
        sheet: "Rubiks1".into(),
        ranking: None,
        state: SyncState::failed(1, RetryReason::Initial),
        error: Some(SyncError {
            category: ErrorCategory::RateLimited,
            can_retry: true,
            detail: "HTTP 429 Too Many Requests".to_string(),
            attempt: 1,
            cause: None,
        }),
    })
    .unwrap();

    let failed = wait_for_condition(
        || {
            let board = board.clone();
            async move { board.view().await.error.is_some() }
        },
        Duration::from_secs(2),
    )
    .await;
    assert!(failed);

    let (_, before) = send(board.build_router(), get("/api/board")).await;
    assert_eq!(before["error"]["category"], "rate-limited");
    assert_eq!(before["error"]["can_retry"], true);

    let (status, body) = send(board.build_router(), post_json("/api/retry", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], json!(null));
    assert_eq!(body["sync"]["status"], "loading");
    assert_eq!(body["sync"]["retry_reason"], "manual");
    assert_eq!(body["controls_locked"], true);
}

#[tokio::test]
async fn test_retry_on_stopped_controller_is_unavailable() {
    let mut control = MockSyncControl::new();
    control.expect_start().returning(|_| Ok(()));
    control
        .expect_retry_now()
        .returning(|| Err(SyncerError::ControllerClosed));
    let board = Board::new(&test_config(), control).unwrap();
    board.start().await.unwrap();

    let (status, _) = send(board.build_router(), post_json("/api/retry", json!({}))).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_retry_before_start_is_rejected() {
    let mut control = MockSyncControl::new();
    control.expect_retry_now().times(0);
    let board = Board::new(&test_config(), control).unwrap();

    let (status, body) = send(board.build_router(), post_json("/api/retry", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request format: polling has not started");

    let view = board.view().await;
    assert!(!view.controls_locked);
    assert_eq!(view.sync.status, SyncStatus::Idle);
}

#[tokio::test]
async fn test_list_sheets() {
    let board = Board::new(&test_config(), accepting_control()).unwrap();

    let (status, body) = send(board.build_router(), get("/api/sheets")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "id": "Rubiks1", "direction": "ascending" },
            { "id": "Points", "direction": "descending" }
        ])
    );
}

#[tokio::test]
async fn test_health_check() {
    let board = Board::new(&test_config(), accepting_control()).unwrap();

    let (status, body) = send(board.build_router(), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["sheet"], "Rubiks1");
}

#[tokio::test]
async fn test_shutdown_stops_controller() {
    let mut control = MockSyncControl::new();
    control.expect_stop().times(1).returning(|| Ok(()));
    let board = Board::new(&test_config(), control).unwrap();

    board.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shutdown_drops_queued_updates() {
    let mut control = MockSyncControl::new();
    control.expect_stop().times(1).returning(|| Ok(()));
    let board = Board::new(&test_config(), control).unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    board.shutdown().await.unwrap();
    tx.send(rubiks_update()).unwrap();
    board.spawn_update_pump(rx);

    let applied = wait_for_condition(
        || {
            let board = board.clone();
            async move { !board.view().await.rows.is_empty() }
        },
        Duration::from_millis(300),
    )
    .await;
    assert!(!applied, "snapshot applied after shutdown");
}

#[test]
fn test_empty_catalog_is_rejected() {
    let config = shared::BoardConfig {
        sheets: Vec::new(),
        ..test_config()
    };
    assert!(Board::new(&config, MockSyncControl::new()).is_err());
}
