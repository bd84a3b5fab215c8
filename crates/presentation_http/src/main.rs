//! Trainmap HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use application::SightingService;
use clap::Parser;
use infrastructure::{AppConfig, DEFAULT_LOG_FILTER, ResolverAdapter, init_tracing};
use presentation_http::{
    routes,
    shutdown::{self, ShutdownOutcome},
    state::AppState,
};
use tokio::{net::TcpListener, sync::Notify};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Trainmap API server
#[derive(Parser)]
#[command(name = "trainmap-server")]
#[command(author, version, about = "Serves train sightings and transit data over HTTP", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    init_tracing(config.log_format, DEFAULT_LOG_FILTER)?;

    info!("Trainmap v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        dataset = %config.database_filepath,
        preview_days = config.sight_preview_day_count,
        resolver = %config.resolver.base_url,
        error_status_policy = %config.error_status_policy,
        "Configuration loaded"
    );

    let resolver = ResolverAdapter::connect(&config.resolver, &config.database_filepath)
        .context("failed to initialize resolver client")?;
    let sighting_service = SightingService::new(Arc::new(resolver), config.sight_preview_day_count);

    if config.serve_frontend {
        info!(root = %config.frontend_root.display(), "Serving frontend");
    }

    let addr = config.listen_addr();
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);

    let app = routes::create_router(AppState::new(sighting_service, config))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let drain_started = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::begin_drain(
            shutdown::termination_signal(),
            Arc::clone(&drain_started),
        ))
        .into_future();

    match shutdown::run_until_drained(server, drain_started, shutdown_timeout).await? {
        ShutdownOutcome::Drained => info!("Server shutdown complete"),
        ShutdownOutcome::TimedOut => warn!("Server shutdown forced"),
    }

    Ok(())
}
