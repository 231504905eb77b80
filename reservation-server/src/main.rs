//! reservation-server - hostel booking backend
//!
//! Serves reservation CRUD, login and token endpoints over HTTP, backed by
//! an embedded SurrealDB store.

use reservation_server::{AppState, Config, api, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    logging::init_logger(&config.log_level, config.log_dir.as_deref());

    tracing::info!("Starting reservation-server (env: {})", config.environment);
    if config.is_development() && config.uses_memory_store() {
        tracing::warn!("Using in-memory store, data is lost on restart");
    }

    let http_port = config.http_port;
    let state = AppState::initialize(config).await?;
    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("reservation-server HTTP listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("reservation-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
