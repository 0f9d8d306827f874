//! Relay Dashboard - Main Entry Point
//!
//! Read-only reporting view: renders the last 50 turns the agent loop
//! recorded in SQLite as an HTML table. Purely presentational; it never
//! writes and shares nothing with the receiver beyond the database file.

mod db;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// How many turns the table shows.
const TURN_LIMIT: i64 = 50;

#[derive(Clone)]
struct DashboardState {
    db_path: Arc<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "relay_dashboard=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let bind_address =
        std::env::var("DASHBOARD_BIND").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let db_path =
        PathBuf::from(std::env::var("SQLITE_DB_PATH").unwrap_or_else(|_| "state.db".into()));

    let state = DashboardState {
        db_path: Arc::new(db_path),
    };
    let app = Router::new()
        .route("/", get(show_dashboard))
        .fallback(show_dashboard)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {bind_address}"))?;
    info!(address = %bind_address, "Dashboard listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// GET * — render the turn history.
async fn show_dashboard(State(state): State<DashboardState>) -> Response {
    let db_path = Arc::clone(&state.db_path);
    let turns = tokio::task::spawn_blocking(move || db::fetch_turns(&db_path, TURN_LIMIT)).await;

    match turns {
        Ok(Ok(turns)) => {
            let rendered_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%SZ").to_string();
            Html(render::render_page(&turns, &rendered_at)).into_response()
        }
        Ok(Err(e)) => {
            error!("Turn history query failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "query error").into_response()
        }
        Err(e) => {
            error!("Turn history task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "query error").into_response()
        }
    }
}
