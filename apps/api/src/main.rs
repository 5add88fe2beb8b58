mod config;
mod cv;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod scoring;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{Completion, LlmClient};
use crate::render::default_page_config;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Covercraft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client, if a key is configured
    let llm: Option<Arc<dyn Completion>> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.openai_base_url.clone(),
                config.openai_model.clone(),
            );
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; scoring and generation will be refused");
            None
        }
    };

    let sessions = SessionStore::new(chrono::Duration::minutes(config.session_idle_ttl_minutes));
    info!(
        "Session store ready (idle TTL: {} min)",
        config.session_idle_ttl_minutes
    );

    let page_config = default_page_config();

    // Build app state
    let state = AppState {
        config: config.clone(),
        sessions,
        llm,
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
