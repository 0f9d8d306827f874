//! Webhook Ingestion Handler
//!
//! One handler owns the whole `POST /` lifecycle. Ordering matters: the
//! update must be durably appended to the queue before anything else
//! happens, and everything after the append is best-effort and must not
//! change the response.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, instrument};

use super::update;
use crate::api::AppState;
use crate::queue::QueueError;

/// Header carrying the shared secret, set by Telegram on every delivery.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Rejection of an inbound delivery.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Secret token mismatch")]
    Forbidden,

    #[error("Request body is not valid JSON")]
    BadJson,

    #[error(transparent)]
    Queue(#[from] QueueError),
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            Self::BadJson => (StatusCode::BAD_REQUEST, "bad json"),
            Self::Queue(e) => {
                error!("Queue append failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "queue error")
            }
        };
        (status, body).into_response()
    }
}

/// POST / — receive one webhook delivery.
///
/// Responds `ok` to every authenticated, syntactically valid request,
/// whether or not a control command was recognized or acted on.
#[instrument(skip_all)]
pub async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, IngestError> {
    if let Some(secret) = &state.config.webhook_secret {
        let token = headers
            .get(SECRET_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if token != secret {
            return Err(IngestError::Forbidden);
        }
    }

    let update: Value = serde_json::from_slice(&body).map_err(|_| IngestError::BadJson)?;

    // Durable append, off the async executor. This must succeed before any
    // response is sent; a dropped update must never be acknowledged.
    let queue = Arc::clone(&state.queue);
    let record = update.clone();
    tokio::task::spawn_blocking(move || queue.append(&record))
        .await
        .map_err(|e| QueueError::Io(std::io::Error::other(e)))??;

    if let Some(wakeup) = &state.wakeup {
        wakeup.notify();
    }

    route_control_commands(&state, &update);

    Ok("ok")
}

/// Act on recognized control shapes. Everything here is best-effort.
fn route_control_commands(state: &AppState, update: &Value) {
    if let Some(chat_id) = update::cancel_command_chat(update) {
        if state.access.is_authorized(&chat_id) {
            if let Some(cancel) = &state.cancel {
                cancel.trigger();
            }
        } else {
            info!(%chat_id, "Ignoring /cancel from unauthorized chat");
        }
    }

    if let Some(callback) = update::cancel_callback(update) {
        let authorized = state.access.is_authorized(&callback.chat_id);
        if authorized {
            if let Some(cancel) = &state.cancel {
                cancel.trigger();
            }
        } else {
            info!(chat_id = %callback.chat_id, "Ignoring cancel button from unauthorized chat");
        }

        // Acknowledge either way so the client-side spinner clears; only an
        // authorized press learns that anything happened.
        if let Some(telegram) = &state.telegram {
            let telegram = Arc::clone(telegram);
            let text = authorized.then_some("Cancelled");
            tokio::spawn(async move {
                telegram
                    .answer_callback_query(&callback.callback_id, text)
                    .await;
            });
        }
    }
}
