//! Alpha Engine Binary
//!
//! Serves the scoring engine over HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin alpha-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ALPHA_ENGINE_CONFIG`: Path to the YAML config (default: `config.yaml`)
//! - `RUST_LOG`: Log filter (default: `observability.logging.level`)

use std::net::SocketAddr;

use alpha_engine::config::{Config, load_config};
use alpha_engine::infrastructure::config::EngineContainer;
use alpha_engine::infrastructure::http::{AppState, create_router};
use alpha_engine::observability::{MetricsConfig, init_metrics};
use alpha_engine::telemetry::init_telemetry;
use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = load_config(None).context("Failed to load configuration")?;
    init_telemetry(&config.observability.logging);

    tracing::info!("Starting Alpha Engine");
    log_config(&config);

    if config.observability.metrics.enabled {
        let addr: SocketAddr = config
            .observability
            .metrics
            .listen_addr
            .parse()
            .context("Invalid metrics listen address")?;
        if let Err(e) = init_metrics(&MetricsConfig::with_addr(addr)) {
            tracing::warn!(error = %e, "Failed to start metrics exporter, continuing without it");
        }
    }

    let container = EngineContainer::from_config(&config);
    let app = create_router(AppState::new(container));

    let http_addr: SocketAddr = format!(
        "{}:{}",
        config.server.bind_address, config.server.http_port
    )
    .parse()
    .context("Invalid HTTP bind address")?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /api/v1/score");
    tracing::info!("  POST /api/v1/score-batch");

    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("Failed to bind {http_addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Alpha engine stopped");
    Ok(())
}

fn log_config(config: &Config) {
    let decision = &config.scoring.decision;
    tracing::info!(
        entry = decision.entry_threshold,
        maintain = decision.maintain_threshold,
        exit_floor = decision.exit_floor,
        slots = decision.slots,
        top_n = config.scoring.top_n,
        cache = config.cache.enabled,
        max_attempts = config.retry.max_attempts,
        holidays = config.calendar.holidays.len(),
        "Configuration loaded"
    );
}

/// Load .env file from current or ancestor directories.
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

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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

    tracing::info!("Graceful shutdown started, draining in-flight requests");
}
