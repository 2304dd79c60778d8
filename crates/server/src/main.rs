//! Liquor catalog HTTP server.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `LIQUOR_DATA_PATH`: Catalog CSV (default: data/liquors.csv)
//! - `RUST_LOG`: Log filter (default: info)
//!
//! A catalog that fails to load aborts startup.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_loader::Catalog;
use server::{create_router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    info!("Starting liquor catalog server");

    info!("Loading catalog from {}", config.data_path.display());
    let catalog = Catalog::load_from_file(&config.data_path)
        .with_context(|| format!("Failed to load catalog from {}", config.data_path.display()))?;
    info!(
        "Catalog loaded: {} records ({} rows skipped)",
        catalog.len(),
        catalog.load_report().rows_skipped()
    );

    let state = AppState::new(Arc::new(catalog));
    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
