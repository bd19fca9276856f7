//! HTTP server for heraldd
//!
//! Accepts chat slash-commands on `/` (form body or query string) and
//! answers with the chat JSON reply.

use anyhow::{Context, Result};
use axum::extract::{Form, State};
use axum::routing::get;
use axum::{Json, Router};
use herald_common::slack::{SlackResponse, SlashCommand};
use herald_common::PluginHost;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Application state shared across handlers
pub struct AppState {
    pub host: PluginHost,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(host: PluginHost) -> Self {
        Self {
            host,
            start_time: Instant::now(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_command).post(handle_command))
        .route("/health", get(handle_health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn handle_command(
    State(state): State<Arc<AppState>>,
    Form(command): Form<SlashCommand>,
) -> Json<SlackResponse> {
    debug!(
        "Slash command from {}: '{}'",
        command.user_name.as_deref().unwrap_or("unknown"),
        command.text
    );
    let envelope = state.host.respond(&command.text).await;
    Json(SlackResponse::from(&envelope))
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "heraldd",
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "plugins": state.host.count(),
    }))
}

/// Run the HTTP server
pub async fn run(state: AppState, listen: &str) -> Result<()> {
    let app = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind {}", listen))?;
    info!("Listening on http://{}", listen);

    axum::serve(listener, app).await?;
    Ok(())
}
