//! Journal Service Binary
//!
//! Serves the trade journal's account and identity REST API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin journal-service
//! ```
//!
//! # Environment Variables
//!
//! - `JOURNAL_CONFIG`: config file path (default: config.yaml)
//! - `JOURNAL_BACKEND_URL`, `JOURNAL_BACKEND_API_KEY`: hosted backend
//!   credentials, referenced from config.yaml
//! - `RUST_LOG`: overrides the configured log level

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use journal_service::config::load_config;
use journal_service::infrastructure::config::build_router;
use journal_service::observability::{MetricsConfig, init_metrics};
use journal_service::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_config(None).context("failed to load configuration")?;
    let _telemetry = init_telemetry(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting journal service");

    if config.observability.metrics_port != 0 {
        init_metrics(&MetricsConfig::with_port(config.observability.metrics_port))
            .context("failed to start metrics exporter")?;
        tracing::info!(
            port = config.observability.metrics_port,
            "Prometheus metrics exporter listening"
        );
    }

    let app = build_router(&config.backend, env!("CARGO_PKG_VERSION"))
        .context("failed to build backend adapters")?;

    let addr = config.server.listen_address();
    let listener = TcpListener::bind(addr.as_str())
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /api/v1/auth/register");
    tracing::info!("  POST /api/v1/auth/login");
    tracing::info!("  POST /api/v1/auth/logout");
    tracing::info!("  GET  /api/v1/profile");
    tracing::info!("  POST /api/v1/accounts");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Journal service stopped");
    Ok(())
}

/// Load `.env` from the working directory or the nearest ancestor that has one.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// # Panics
///
/// Panics if signal handlers cannot be installed.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
