//! HTTP API for clinical note health metric extraction.

use tracing::info;
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod error;
mod router;
mod routes;
mod state;

use config::Settings;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    // Structured JSON logging, level from LOG_LEVEL
    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    let state = AppState::new(&settings.config, &settings.api_secret);
    let app = router::build_router(state);

    let addr = &settings.config.server.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("vitalnote health metric API listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
