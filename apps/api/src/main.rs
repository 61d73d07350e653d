mod config;
mod embedding;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::NullEmbedder;
use crate::matching::engine::TailoringEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tailor API v{}", env!("CARGO_PKG_VERSION"));

    // Embedding provider: NullEmbedder by default — semantic scoring
    // degrades to 0.0 until a deployment wires a real model here.
    let provider = Arc::new(NullEmbedder);

    // Engine construction validates the weight configuration; invalid
    // weights abort startup before the server binds.
    let engine = TailoringEngine::new(
        config.weights,
        config.selection,
        provider,
        config.embed_cache_capacity,
    )?
    .with_semantic_deadline(Duration::from_secs(config.semantic_deadline_secs));
    info!("Tailoring engine initialized (weights: {:?})", config.weights);

    let state = AppState {
        config: config.clone(),
        engine: Arc::new(engine),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
