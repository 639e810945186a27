//! Event Admission service
//!
//! Serves the internal RPC endpoints of the configured role until Ctrl-C.

use anyhow::Result;
use event_admission::config::AppConfig;
use event_admission::state::AppState;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // Prefer RUST_LOG, fall back to server.log_level
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.server.log_level.clone().into()))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(
        role = ?config.deployment.role,
        storage = ?config.deployment.storage,
        environment = ?config.server.environment,
        "Starting event admission service"
    );

    let state = match AppState::from_config(&config).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialise application state");
            return Err(e.into());
        }
    };

    let addr = config.server.socket_addr()?;
    let app = state.router(config.server.request_timeout());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Received shutdown signal");
        })
        .await?;

    info!("Event admission service shutdown complete");
    Ok(())
}
