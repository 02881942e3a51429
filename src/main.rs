mod api;
mod archive;
mod catalog;
mod config;
mod error;
mod resolver;
mod storage;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::AppState;
use config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asset_catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");
    if !config.asset_root.is_dir() {
        tracing::warn!(
            "Asset root {:?} does not exist; downloads will fall back to placeholders",
            config.asset_root
        );
    }

    let addr = config.bind_addr;
    let state = Arc::new(AppState::new(config));
    tracing::info!(
        "Loaded {} assets, {} source file mappings",
        state.catalog.len(),
        state.resolver.len()
    );

    let app = api::router(state.clone());

    tracing::info!("Asset catalog starting on http://{}", addr);
    tracing::info!("Assets root: {:?}", state.config.asset_root);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET /assets                - List active assets");
    tracing::info!("  GET /assets/:id/download   - Download one asset");
    tracing::info!("  GET /assets/download-all   - Download every asset as a zip");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
