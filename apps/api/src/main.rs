use anyhow::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use optimoto_api::config::Config;
use optimoto_api::routes::build_router;
use optimoto_api::state::AppState;

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

    info!("Starting Optimoto API v{}", env!("CARGO_PKG_VERSION"));

    if config.dataset_path.exists() {
        info!("Dataset: {}", config.dataset_path.display());
    } else {
        // Not fatal: requests answer with DATASET_NOT_FOUND until the file appears.
        warn!("Dataset not found at: {}", config.dataset_path.display());
    }
    info!(
        "Dataset source: {}",
        if config.dataset_cache { "cached" } else { "reload per request" }
    );

    let port = config.port;
    let state = AppState::from_config(config);

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
