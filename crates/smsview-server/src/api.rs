use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use smsview_shared::build_threads_at;
use smsview_twilio::MessageSource;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::render::Templates;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MessageSource>,
    pub templates: Arc<Templates>,
    pub config: Arc<ServerConfig>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Fetch, group and render.  Nothing is written until the page is fully
/// rendered.
async fn index(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let records = state.source.fetch_messages().await?;
    let threads = build_threads_at(
        &records,
        &state.config.phone_number,
        Utc::now(),
        state.config.last_sent_policy,
    )?;
    let html = state.templates.render_index(&threads)?;

    debug!(
        records = records.len(),
        threads = threads.len(),
        bytes = html.len(),
        "Rendered thread list"
    );

    Ok(Html(html))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
