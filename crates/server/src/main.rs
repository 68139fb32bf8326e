use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use isohunt_core::{load_config, validate_config, Config, HttpFetcher};
use isohunt_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = read_config()?;

    let fetcher = HttpFetcher::new(&config.site).context("Failed to create HTTP client")?;
    let state = Arc::new(AppState::from_config(config.clone(), Arc::new(fetcher)));
    info!(
        provider = state.provider().name(),
        interval_secs = state.cache().min_interval().as_secs(),
        "Connector ready"
    );

    // The first poll fires immediately, so the cache is warm before most
    // clients arrive.
    match state.poller() {
        Some(poller) => poller.start(),
        None => info!("Cache poller disabled; refresh only via POST /api/v1/cache/refresh"),
    }

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!(%addr, "Serving IsoHunt connector API");

    axum::serve(listener, create_router(Arc::clone(&state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(poller) = state.poller() {
        poller.stop();
    }

    info!("Connector shut down");
    Ok(())
}

/// Load and validate the config named by `ISOHUNT_CONFIG` (default `config.toml`).
fn read_config() -> Result<Config> {
    let config_path = std::env::var("ISOHUNT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        site = %config.site.base_url,
        downloads = %config.site.download_url,
        min_interval_mins = config.cache.min_interval_mins,
        poll_enabled = config.cache.poll_enabled,
        "Configuration loaded"
    );
    Ok(config)
}

/// Resolves on Ctrl+C or SIGTERM. A signal handler that cannot be installed
/// is logged and never fires, so the other one can still stop the server.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, draining requests"),
        _ = terminate => info!("SIGTERM received, draining requests"),
    }
}
