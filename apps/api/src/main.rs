mod board;
mod config;
mod errors;
mod models;
mod routes;
mod source;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::board::{BoardHandle, SnapshotRenderer};
use crate::config::{Config, JobSourceConfig};
use crate::routes::build_router;
use crate::source::{CachedJobSource, FileJobSource, HttpJobSource, JobSource};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job board v{}", env!("CARGO_PKG_VERSION"));

    let upstream = build_job_source(&config.job_source)?;
    let jobs = Arc::new(CachedJobSource::new(upstream, config.cache_ttl));
    info!("Job cache initialized (ttl: {}s)", jobs.ttl().as_secs());

    // The feed keeps serving even if the board cannot initialize
    let renderer = SnapshotRenderer::new(config.board_slots.iter().copied());
    let board = match BoardHandle::init(renderer, jobs.clone()).await {
        Ok(handle) => {
            info!("Job board initialized");
            Some(handle)
        }
        Err(e) => {
            warn!("Job board disabled: {e}");
            None
        }
    };

    let state = AppState {
        jobs,
        board,
        config: config.clone(),
    };

    // The widget is embedded on another origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_job_source(config: &JobSourceConfig) -> Result<Arc<dyn JobSource>> {
    let source: Arc<dyn JobSource> = match config {
        JobSourceConfig::Http {
            url,
            api_key,
            timeout,
        } => {
            info!("Job source: {url}");
            Arc::new(HttpJobSource::new(url.clone(), api_key.clone(), *timeout)?)
        }
        JobSourceConfig::File(path) => {
            info!("Job source: file {}", path.display());
            Arc::new(FileJobSource::new(path.clone()))
        }
    };
    Ok(source)
}
