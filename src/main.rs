//! Lesson Guard - content cache and request throttling for a video-learning backend
//!
//! Composition root: builds the process-wide caches and rate limiter once,
//! hands them to the admin router, and drops them on shutdown.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lesson_guard::api::create_router;
use lesson_guard::{spawn_sweep_task, AppState, Config};

/// Main entry point for the Lesson Guard service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create content caches, rate limiter and policies
/// 4. Start background sweep task (unless disabled)
/// 5. Serve the admin router on the configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lesson_guard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lesson Guard");

    let config = Config::from_env();
    info!(
        "Configuration loaded: ttl checkpoints={}s quiz={}s summary={}s, user quota={}/{}s, video quota={}/{}s, port={}, sweep_interval={}s",
        config.checkpoint_ttl,
        config.quiz_ttl,
        config.summary_ttl,
        config.user_rate_limit,
        config.user_rate_window,
        config.video_rate_limit,
        config.video_rate_window,
        config.server_port,
        config.sweep_interval
    );

    let state = AppState::from_config(&config).context("invalid rate limit configuration")?;
    info!("Content caches and rate limiter initialized");

    let sweep_handle = if config.sweep_interval > 0 {
        info!("Background sweep task started");
        Some(spawn_sweep_task(state.clone(), config.sweep_interval))
    } else {
        info!("Background sweep disabled, relying on lazy expiry");
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the sweep task.
async fn shutdown_signal(sweep_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", err);
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

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Sweep task aborted");
    }
}
