use std::io;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use futures::{stream, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;

use crate::archive::{write_archive, ArchivePlan, ArchiveStage, BUNDLE_FILENAME};
use crate::catalog::{seed_assets, AssetCatalog, AssetId, AssetRecord};
use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::resolver::FileResolver;
use crate::storage::{AssetStorage, LocalStorage};

/// Bytes buffered between the archive writer and the response body
const ARCHIVE_PIPE_CAPACITY: usize = 64 * 1024;

/// Application state shared across handlers
pub struct AppState {
    pub catalog: AssetCatalog,
    pub resolver: FileResolver,
    pub storage: Arc<dyn AssetStorage>,
    pub config: ServerConfig,
}

impl AppState {
    /// Seed catalog and resolver, files served from the configured asset root
    pub fn new(config: ServerConfig) -> Self {
        let storage = Arc::new(LocalStorage::new(config.asset_root.clone()));
        Self::with_parts(
            AssetCatalog::with_seed(seed_assets()),
            FileResolver::seeded(),
            storage,
            config,
        )
    }

    pub fn with_parts(
        catalog: AssetCatalog,
        resolver: FileResolver,
        storage: Arc<dyn AssetStorage>,
        config: ServerConfig,
    ) -> Self {
        Self {
            catalog,
            resolver,
            storage,
            config,
        }
    }
}

/// `attachment; filename="..."` with quote characters neutralised
fn attachment(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// GET /assets - active records in catalog order
pub async fn list_assets(State(state): State<Arc<AppState>>) -> Json<Vec<AssetRecord>> {
    Json(state.catalog.list_active())
}

/// GET /assets/:id - one record, active or not
pub async fn get_asset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AssetId>,
) -> Result<Json<AssetRecord>> {
    Ok(Json(state.catalog.get_by_id(id)?))
}

/// GET /assets/:id/download - stream one asset file
pub async fn download_asset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AssetId>,
) -> Result<Response> {
    let record = state.catalog.get_by_id(id).map_err(|e| {
        tracing::warn!("Download requested for unknown asset {}", id);
        e
    })?;

    let source = state.resolver.resolve(id).map_err(|e| {
        tracing::warn!("Asset {} has no source file mapping", id);
        e
    })?;

    let size = state.storage.size(source).await.map_err(|e| {
        tracing::error!("Asset {} maps to {} but it cannot be read: {}", id, source, e);
        ServerError::from(e)
    })?;
    let reader = state.storage.open(source).await?;

    tracing::debug!("Streaming asset {} from {} ({} bytes)", id, source, size);

    let headers = [
        (header::CONTENT_TYPE, record.content_type().to_string()),
        (header::CONTENT_DISPOSITION, attachment(&record.filename)),
        (header::CONTENT_LENGTH, size.to_string()),
    ];
    Ok((headers, Body::from_stream(ReaderStream::new(reader))).into_response())
}

/// GET /assets/download-all - stream every active asset as one zip
///
/// The plan is built before answering, so probing failures still produce a JSON
/// error. Once streaming starts, a writer failure ends the body with an error
/// and the transport truncates the response.
pub async fn download_all(State(state): State<Arc<AppState>>) -> Result<Response> {
    let plan = ArchivePlan::build(&state.catalog, &state.resolver, state.storage.as_ref())
        .await
        .map_err(|e| {
            tracing::error!(stage = %ArchiveStage::Failed, "Failed to plan archive: {}", e);
            e
        })?;

    tracing::info!(
        entries = plan.len(),
        omitted = plan.omitted.len(),
        "Starting bulk archive download"
    );

    let (write_half, read_half) = tokio::io::duplex(ARCHIVE_PIPE_CAPACITY);
    let timeout = state.config.archive_timeout;
    let storage = state.storage.clone();

    let writer = tokio::spawn(async move {
        let build = async {
            let mut out = write_archive(&plan, storage.as_ref(), write_half).await?;
            out.shutdown().await?;
            Ok::<_, ServerError>(())
        };

        match tokio::time::timeout(timeout, build).await {
            Ok(Ok(())) => {
                tracing::info!(stage = %ArchiveStage::Done, "Bulk archive complete");
                Ok(())
            }
            Ok(Err(e)) => {
                tracing::error!(stage = %ArchiveStage::Failed, "Bulk archive aborted: {}", e);
                Err(io::Error::new(io::ErrorKind::Other, e.to_string()))
            }
            Err(_) => {
                tracing::error!(
                    stage = %ArchiveStage::Failed,
                    "Bulk archive timed out after {:?}",
                    timeout
                );
                Err(io::Error::new(io::ErrorKind::TimedOut, "archive build timed out"))
            }
        }
    });

    // Surfaces a writer failure after the pipe drains, so the body never ends cleanly
    let trailer = stream::once(async move {
        match writer.await {
            Ok(result) => result,
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    })
    .filter_map(|result| async move { result.err().map(Err::<Bytes, io::Error>) });

    let body = Body::from_stream(ReaderStream::new(read_half).chain(trailer));
    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (header::CONTENT_DISPOSITION, attachment(BUNDLE_FILENAME)),
    ];
    Ok((headers, body).into_response())
}
