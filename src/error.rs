use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::catalog::AssetId;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Asset not found: {0}")]
    RecordNotFound(AssetId),

    #[error("Asset file not found: {0}")]
    ResolutionNotFound(AssetId),

    #[error("Asset file missing from storage: {0}")]
    SourceFileMissing(String),

    #[error("Archive write failed: {0}")]
    ArchiveWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for ServerError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound(key) => ServerError::SourceFileMissing(key),
            StorageError::InvalidKey(key) => ServerError::SourceFileMissing(key),
            StorageError::Io(e) => ServerError::Io(e),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::RecordNotFound(_) => (StatusCode::NOT_FOUND, "Asset not found"),
            ServerError::ResolutionNotFound(_) => {
                (StatusCode::NOT_FOUND, "Asset file not found")
            }
            ServerError::SourceFileMissing(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Asset file is missing from storage",
            ),
            ServerError::ArchiveWrite(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to download all assets",
            ),
            ServerError::Config(_) | ServerError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
