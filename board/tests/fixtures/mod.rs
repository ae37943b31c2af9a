//! Test fixtures for board integration tests

#![allow(dead_code)] // Not every test binary uses every fixture

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use board::traits::MockSyncControl;
use shared::{BoardConfig, Entry, RetryReason, SheetConfig, SortDirection, SyncState, SyncUpdate};
use syncer::core::rank;

/// Two sheets: ascending solve times first, descending points second
pub fn test_config() -> BoardConfig {
    BoardConfig {
        sheets: vec![
            SheetConfig::new("Rubiks1", SortDirection::Ascending),
            SheetConfig::new("Points", SortDirection::Descending),
        ],
        ..BoardConfig::default()
    }
}

/// Sync control that accepts every command
pub fn accepting_control() -> MockSyncControl {
    let mut control = MockSyncControl::new();
    control.expect_start().returning(|_| Ok(()));
    control.expect_change_source().returning(|_| Ok(()));
    control.expect_retry_now().returning(|| Ok(()));
    control.expect_stop().returning(|| Ok(()));
    control
}

pub fn entries(pairs: &[(&str, &str)]) -> Vec<Entry> {
    pairs.iter().map(|(name, score)| Entry::new(*name, *score)).collect()
}

pub fn success_update(sheet: &SheetConfig, pairs: &[(&str, &str)]) -> SyncUpdate {
    SyncUpdate {
        sheet: sheet.id.clone(),
        ranking: Some(rank(&entries(pairs), sheet.direction)),
        state: SyncState::success(RetryReason::Initial),
        error: None,
    }
}

/// Solve times for the first sheet; Carol's row sorts last
pub fn rubiks_update() -> SyncUpdate {
    success_update(
        &test_config().sheets[0],
        &[("Alice", "12.5"), ("Bob", "9.1"), ("Carol", "20.0"), ("Dan", "15.2")],
    )
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send one request through the router and decode the JSON body
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Poll `condition` until it holds or `timeout` elapses
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = tokio::time::Instant::now();

    loop {
        if condition().await {
            return true;
        }

        if start.elapsed() > timeout {
            return false;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
