//! rrdemo node
//!
//! One member of the round-robin demo ring:
//! - `/` serves HTML until `max_requests`, then one 503 and rollover
//! - `/health`, `/reset`, `/status`, `/metrics`
//! - Structured JSON event log to stdout and `<root>/<app>/<app>.log`

use std::net::SocketAddr;

use rrdemo_core::record::LogEvent;
use tracing_subscriber::{fmt, EnvFilter};

use rrdemo_node::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::var(config::CONFIG_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_or_default(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg, std::env::var("HOSTNAME").ok())?;

    let id = state.identity();
    state.log(LogEvent::info(format!(
        "Starting {} (Container {}) on port {}",
        id.app_name,
        id.container_number,
        listen.port()
    )));

    let app = router::build_router(state);

    tracing::info!(%listen, "rrdemo-node starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("rrdemo-node stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
