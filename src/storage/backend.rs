//! Asset storage trait definition.
//!
//! Keys are the on-disk source filenames handed out by the resolver, relative to
//! the configured asset root.

use async_trait::async_trait;
use std::fmt;

/// Storage error types
#[derive(Debug)]
pub enum StorageError {
    /// No object stored under the key
    NotFound(String),
    /// Key escapes the asset root or is otherwise unusable
    InvalidKey(String),
    /// IO error
    Io(std::io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(key) => write!(f, "Asset file not found: {}", key),
            StorageError::InvalidKey(key) => write!(f, "Invalid asset key: {}", key),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Read-only access to the asset files behind the catalog.
#[async_trait]
pub trait AssetStorage: Send + Sync {
    /// Check whether a file is stored under the key
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get the size of a stored file without reading it
    async fn size(&self, key: &str) -> StorageResult<u64>;

    /// Open a stored file for streaming
    async fn open(&self, key: &str) -> StorageResult<Box<dyn tokio::io::AsyncRead + Unpin + Send>>;
}
