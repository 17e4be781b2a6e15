use std::sync::Arc;

use dotenv::dotenv;
use paytrack_core::{
    api::create_router, config::AppConfig, ingest::CsvFileSource, telemetry, AppState,
};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    telemetry::init();

    info!("Starting PayTrack Core Server...");

    let config = AppConfig::from_env()?;
    let source = CsvFileSource::new(config.csv_path.clone());
    info!("Serving invoices from {}", source.path().display());

    let address = config.bind_address();
    let app = create_router(AppState::new(Arc::new(source), config));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", address, e))?;

    info!("Server is online at http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("PayTrack Core Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down gracefully...");
}
