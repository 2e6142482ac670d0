//! Fino Guard - aggregate cache and rate limiter service
//!
//! Runs the cache and rate limiter behind a small HTTP surface, with
//! background sweeps for both.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fino_guard::api::create_router;
use fino_guard::{spawn_cache_sweeper, spawn_limiter_sweeper, AppState, Config};

/// Main entry point for the Fino Guard server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache and the rate limiter
/// 4. Start background sweep tasks
/// 5. Serve the router until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fino_guard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fino Guard");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, rate_limit={}/{}s, port={}, cleanup_interval={}s",
        config.cache_ttl,
        config.rate_limit_max_requests,
        config.rate_limit_window,
        config.server_port,
        config.cleanup_interval
    );

    let state = AppState::from_config(&config);

    let sweepers = vec![
        spawn_cache_sweeper(state.cache.clone(), config.cleanup_interval),
        spawn_limiter_sweeper(state.limiter.clone(), config.cleanup_interval),
    ];
    info!("Background sweep tasks started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    // Connect info feeds the peer address into rate-limit keys.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(sweepers))
    .await
    .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweepers.
async fn shutdown_signal(sweepers: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    for handle in sweepers {
        handle.abort();
    }
    warn!("Sweep tasks aborted");
}
