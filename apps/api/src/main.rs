mod config;
mod errors;
mod feedback;
mod llm_client;
mod questions;
mod routes;
mod sessions;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::feedback::engine::build_feedback_engine;
use crate::feedback::knowledge::KnowledgeBase;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ortho Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Load keyword knowledge base (built-in table unless overridden)
    let knowledge = match &config.knowledge_base_path {
        Some(path) => {
            let kb = KnowledgeBase::from_path(path)?;
            info!("Knowledge base loaded from {}", path.display());
            kb
        }
        None => KnowledgeBase::reference(),
    };
    info!("Knowledge base: {} topics", knowledge.topics.len());

    // Initialize feedback engine (heuristic unless FEEDBACK_BACKEND=remote)
    let feedback_engine = build_feedback_engine(&config, Arc::new(knowledge))?;
    info!(
        "Feedback engine initialized (backend: {})",
        feedback_engine.backend()
    );

    let state = AppState::new(feedback_engine);

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
