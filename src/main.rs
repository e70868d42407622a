//! Deal Watch - posts discounted products once per dedup window
//!
//! Runs the deal monitor loop alongside a small admin HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deal_watch::api::create_router;
use deal_watch::deals::{JsonFileSource, LogNotifier, Notifier};
use deal_watch::{spawn_monitor_task, AppState, Config, Monitor, MonitorSettings};

/// Main entry point for the deal monitor.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Create the shared dedup cache
/// 4. Start the monitor task
/// 5. Serve the admin API on the configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Defaults to "info" level, can be overridden with RUST_LOG env var
    let default_filter = if config.debug {
        "deal_watch=debug,tower_http=info"
    } else {
        "deal_watch=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Deal Watch");

    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: cache_duration={}h, interval={}s, min_discount={}%, deals_file={}, port={}",
        config.cache_duration_hours,
        config.scan_interval,
        config.min_discount,
        config.deals_file.display(),
        config.admin_port
    );

    let state = AppState::from_config(&config);
    info!("Dedup cache initialized");

    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);
    let monitor = Monitor::new(
        Arc::new(JsonFileSource::new(&config.deals_file)),
        Arc::clone(&notifier),
        Arc::clone(&state.cache),
        MonitorSettings::from_config(&config),
    );
    let monitor_handle = spawn_monitor_task(monitor);
    info!("Monitor task started");

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.admin_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind admin port {}", config.admin_port))?;
    info!("Admin API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(monitor_handle))
        .await
        .context("admin server failed")?;

    if let Err(err) = notifier
        .send_status("Deal monitor is shutting down", false)
        .await
    {
        warn!(error = %err, "Failed to send shutdown status");
    }

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the monitor task and allows graceful shutdown.
async fn shutdown_signal(monitor_handle: tokio::task::JoinHandle<()>) {
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

    monitor_handle.abort();
    warn!("Monitor task aborted");
}
