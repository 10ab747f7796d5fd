//! Cache Bridge - broker-driven invalidation of a local cache
//!
//! Runs the bridge behind an HTTP delivery endpoint, together with the local
//! cache's TTL sweeper and the source liveness watchdog.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_bridge::api::create_router;
use cache_bridge::{spawn_cleanup_task, spawn_watchdog_task, AppState, Config};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Probe namespace awareness and wire cache, monitor and bridge
/// 4. Start the TTL cleanup and source watchdog tasks
/// 5. Serve the HTTP endpoints until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_bridge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cache Bridge");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, default_ttl={}s, source_timeout={}s, upstream_version={:?}",
        config.server_port, config.default_ttl, config.source_timeout, config.upstream_version
    );

    let state = AppState::from_config(&config);
    info!(
        namespace_aware = state.bridge.is_namespace_aware(),
        "Cache event bridge initialized"
    );

    let tasks = vec![
        spawn_cleanup_task(state.cache.clone(), config.cleanup_interval),
        spawn_watchdog_task(
            state.monitor.clone(),
            config.watchdog_interval,
            config.source_timeout,
        ),
    ];

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(tasks))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts background tasks.
async fn shutdown_signal(tasks: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
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
                warn!(error = %err, "Failed to install SIGTERM handler");
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

    for task in tasks {
        task.abort();
    }
    warn!("Background tasks aborted");
}
