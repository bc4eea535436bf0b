//! # smsview-server
//!
//! Single-page viewer for the SMS/MMS history of one Twilio number.
//!
//! Every `GET /` fetches the account's recent messages, groups them into
//! conversations per counterparty, and renders them as HTML.  Nothing is
//! cached or stored between requests.

mod api;
mod config;
mod error;
mod render;

use std::sync::Arc;

use smsview_shared::constants::APP_NAME;
use smsview_twilio::TwilioClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;
use crate::render::Templates;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Load .env (if any) and initialize tracing (respects RUST_LOG)
    // -----------------------------------------------------------------------
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,smsview_server=debug")),
        )
        .init();

    info!("Starting {} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Initialize subsystems
    // -----------------------------------------------------------------------
    let templates = Arc::new(Templates::new()?);

    let client = TwilioClient::new(config.account_sid.clone(), config.auth_token.clone())
        .with_base_url(config.api_base.clone())
        .with_page_size(config.page_size);

    let http_addr = config.http_addr;
    let app_state = AppState {
        source: Arc::new(client),
        templates,
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP server (blocks until shutdown)
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
