//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::access::ChatAllowList;
use crate::config::Config;
use crate::ingest;
use crate::queue::UpdateQueue;
use crate::signal::{CancelSignal, WakeupPipe};
use crate::telegram::TelegramNotifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Durable update queue (always present)
    pub queue: Arc<UpdateQueue>,
    /// Wakeup pipe toward the agent loop (optional)
    pub wakeup: Option<Arc<WakeupPipe>>,
    /// Cancellation signal toward the agent process (optional)
    pub cancel: Option<Arc<CancelSignal>>,
    /// Allow-list gating privileged commands
    pub access: ChatAllowList,
    /// Upstream callback acknowledgments (optional)
    pub telegram: Option<Arc<TelegramNotifier>>,
}

impl AppState {
    /// Build application state from configuration.
    ///
    /// Each optional component exists iff its configuration enables it, so
    /// the minimal deployment is simply "everything off but the queue".
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let queue = Arc::new(UpdateQueue::new(
            config.queue_path.clone(),
            config.queue_lock_path.clone(),
        ));
        let wakeup = config
            .wakeup_fifo_path
            .clone()
            .map(|path| Arc::new(WakeupPipe::new(path)));
        let cancel = config
            .cancel_sentinel_path
            .clone()
            .map(|path| Arc::new(CancelSignal::new(path, config.agent_pid_path.clone())));
        let access = ChatAllowList::new(config.allowed_chat_id.clone());
        let telegram = match &config.bot_token {
            Some(token) => Some(Arc::new(TelegramNotifier::new(
                &config.telegram_api_base,
                token,
            )?)),
            None => None,
        };

        Ok(Self {
            config: Arc::new(config),
            queue,
            wakeup,
            cancel,
            access,
            telegram,
        })
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness probe
        .route("/health", get(health_check))
        // Webhook deliveries
        .route("/", post(ingest::handlers::receive_update))
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
