pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{
    download_all, download_asset, get_asset, health, list_assets, AppState,
};

/// Asset routes, mounted under both `/assets` and `/api/digital-assets`
pub fn assets_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_assets))
        // Static segment takes priority over the `:id` capture
        .route("/download-all", get(download_all))
        .route("/:id", get(get_asset))
        .route("/:id/download", get(download_asset))
}

/// Full application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/assets", assets_router())
        .nest("/api/digital-assets", assets_router())
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
