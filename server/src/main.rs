//! Relay Server - Main Entry Point
//!
//! Webhook ingress and durable handoff for an external agent loop.

use anyhow::{Context, Result};
use tracing::info;

use relay_server::{api, config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_server=info,tower_http=info".into()),
        )
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting relay server"
    );

    // The queue log's directory must exist before the first delivery; the
    // FIFO and pid file are deployment tooling's and the agent's problem.
    if let Some(parent) = config.queue_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating queue directory {}", parent.display()))?;
        }
    }

    if config.has_secret() {
        info!("Secret token verification enabled");
    }
    if config.has_wakeup() {
        info!("Wakeup pipe enabled");
    }
    if config.has_cancellation() {
        info!("Cancellation signaling enabled");
    }
    if config.allowed_chat_id.is_some() {
        info!("Privileged commands restricted to the configured chat");
    } else {
        info!("No chat allow-list configured; every chat may issue privileged commands");
    }

    // Build application state and router
    let state = api::AppState::new(config.clone())?;
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("binding {}", config.bind_address))?;
    info!(address = %config.bind_address, "Webhook server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
