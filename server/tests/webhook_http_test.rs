//! HTTP Integration Tests for Webhook Ingestion
//!
//! Tests the liveness probe, secret gating, JSON validation, durable
//! enqueueing, and line integrity under concurrent deliveries.
//!
//! Run with: `cargo test --test webhook_http_test -- --nocapture`

mod helpers;

use axum::body::Body;
use axum::http::Method;
use helpers::{body_to_string, TestApp};
use tower::ServiceExt;

// ============================================================================
// Liveness
// ============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let app = TestApp::new();

    let req = TestApp::request(Method::GET, "/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(body_to_string(resp).await, "ok");
    assert!(app.queue_lines().is_empty(), "health probe has no side effects");
}

#[tokio::test]
async fn test_unknown_get_path_returns_404() {
    let app = TestApp::new();

    let req = TestApp::request(Method::GET, "/status")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await;

    assert_eq!(resp.status(), 404);
}

// ============================================================================
// Ingestion
// ============================================================================

#[tokio::test]
async fn test_valid_update_is_enqueued() {
    let app = TestApp::new();
    let update = serde_json::json!({
        "update_id": 1001,
        "message": {"chat": {"id": 42}, "text": "hello"},
    });

    let resp = app.post_webhook(&update.to_string(), None).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(body_to_string(resp).await, "ok");

    let lines = app.queue_lines();
    assert_eq!(lines.len(), 1);
    let stored: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(stored, update);
}

#[tokio::test]
async fn test_bad_json_is_rejected_and_never_enqueued() {
    let app = TestApp::new();

    let resp = app.post_webhook("{\"update_id\": ", None).await;

    assert_eq!(resp.status(), 400);
    assert_eq!(body_to_string(resp).await, "bad json");
    assert!(app.queue_lines().is_empty());
}

#[tokio::test]
async fn test_updates_keep_arrival_order() {
    let app = TestApp::new();

    for i in 0..5 {
        let resp = app
            .post_webhook(&serde_json::json!({"update_id": i}).to_string(), None)
            .await;
        assert_eq!(resp.status(), 200);
    }

    let ids: Vec<i64> = app
        .queue_lines()
        .iter()
        .map(|line| {
            serde_json::from_str::<serde_json::Value>(line).unwrap()["update_id"]
                .as_i64()
                .unwrap()
        })
        .collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
}

// ============================================================================
// Secret gating
// ============================================================================

#[tokio::test]
async fn test_missing_secret_header_is_forbidden() {
    let app = TestApp::with_config(|config| {
        config.webhook_secret = Some("hunter2".to_string());
    });

    let resp = app.post_webhook("{\"update_id\": 1}", None).await;

    assert_eq!(resp.status(), 403);
    assert_eq!(body_to_string(resp).await, "forbidden");
    assert!(app.queue_lines().is_empty(), "rejected updates never reach the queue");
}

#[tokio::test]
async fn test_wrong_secret_is_forbidden() {
    let app = TestApp::with_config(|config| {
        config.webhook_secret = Some("hunter2".to_string());
    });

    let resp = app.post_webhook("{\"update_id\": 1}", Some("hunter3")).await;

    assert_eq!(resp.status(), 403);
    assert!(app.queue_lines().is_empty());
}

#[tokio::test]
async fn test_correct_secret_is_accepted() {
    let app = TestApp::with_config(|config| {
        config.webhook_secret = Some("hunter2".to_string());
    });

    let resp = app.post_webhook("{\"update_id\": 1}", Some("hunter2")).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(app.queue_lines().len(), 1);
}

#[tokio::test]
async fn test_no_configured_secret_accepts_everything() {
    let app = TestApp::new();

    let resp = app.post_webhook("{\"update_id\": 1}", Some("anything")).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(app.queue_lines().len(), 1);
}

// ============================================================================
// Wakeup pipe on the request path
// ============================================================================

#[tokio::test]
async fn test_fifo_without_reader_does_not_affect_response() {
    let app = TestApp::new();
    // A real FIFO with nobody reading: the non-blocking notify must fail
    // silently instead of hanging the request.
    let fifo = app.config.wakeup_fifo_path.clone().unwrap();
    nix::unistd::mkfifo(&fifo, nix::sys::stat::Mode::S_IRWXU).unwrap();

    let resp = app.post_webhook("{\"update_id\": 1}", None).await;

    assert_eq!(resp.status(), 200);
    assert_eq!(app.queue_lines().len(), 1);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deliveries_keep_line_integrity() {
    let app = TestApp::new();
    let callers: u64 = 20;

    let mut handles = Vec::new();
    for i in 0..callers {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            let body = serde_json::json!({
                "update_id": i,
                "message": {"chat": {"id": 42}, "text": "x".repeat(256)},
            });
            let req = TestApp::request(Method::POST, "/")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap();
            let resp = router.oneshot(req).await.unwrap();
            assert_eq!(resp.status(), 200);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let lines = app.queue_lines();
    assert_eq!(lines.len() as u64, callers);

    let mut seen_ids: Vec<u64> = lines
        .iter()
        .map(|line| {
            serde_json::from_str::<serde_json::Value>(line)
                .expect("every line is independently valid JSON")["update_id"]
                .as_u64()
                .unwrap()
        })
        .collect();
    seen_ids.sort_unstable();
    let expected: Vec<u64> = (0..callers).collect();
    assert_eq!(seen_ids, expected, "no delivery lost or duplicated");
}
