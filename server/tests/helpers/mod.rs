//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for building and sending requests through the full
//! axum router, with every runtime path pointed into a per-test temp
//! directory so tests never touch each other's queue, sentinel, or pid
//! files.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use relay_server::api::{create_router, AppState};
use relay_server::config::Config;
use relay_server::ingest::handlers::SECRET_HEADER;

/// A router over a fresh temp runtime directory.
pub struct TestApp {
    pub router: Router,
    pub config: Config,
    /// Owns the runtime directory; dropped with the app.
    pub runtime: TempDir,
}

impl TestApp {
    /// Build an app with all features on, no secret, no allow-list.
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Build an app, letting the test adjust the config first.
    ///
    /// The closure receives a config whose paths already point into the
    /// temp runtime directory.
    pub fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let runtime = TempDir::new().expect("temp runtime dir");
        let root = runtime.path();

        let mut config = Config::default_for_test();
        config.queue_path = root.join("webhook_updates.jsonl");
        config.queue_lock_path = Some(root.join("webhook_queue.lock"));
        config.wakeup_fifo_path = Some(root.join("webhook_notify.fifo"));
        config.cancel_sentinel_path = Some(root.join("cancel"));
        config.agent_pid_path = Some(root.join("agent.pid"));
        adjust(&mut config);

        let state = AppState::new(config.clone()).expect("app state");
        Self {
            router: create_router(state),
            config,
            runtime,
        }
    }

    /// Start building a request.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder().method(method).uri(uri)
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// POST a raw body to `/`, optionally with the secret header.
    pub async fn post_webhook(&self, body: &str, secret: Option<&str>) -> Response<Body> {
        let mut builder = Self::request(Method::POST, "/").header("Content-Type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header(SECRET_HEADER, secret);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.oneshot(request).await
    }

    /// Lines currently in the queue log (empty if nothing was enqueued yet).
    pub fn queue_lines(&self) -> Vec<String> {
        match std::fs::read_to_string(&self.config.queue_path) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Whether the cancel sentinel exists.
    pub fn sentinel_present(&self) -> bool {
        self.config
            .cancel_sentinel_path
            .as_ref()
            .is_some_and(|path| path.exists())
    }
}

/// Collect a response body as a UTF-8 string.
pub async fn body_to_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
