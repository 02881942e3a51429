//! Local filesystem asset storage.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use super::backend::{AssetStorage, StorageError, StorageResult};

/// Serves asset files straight out of a directory.
///
/// ```text
/// {base_path}/
///   {source filename}
/// ```
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the full path for a key, refusing anything that leaves the root
    fn key_path(&self, key: &str) -> StorageResult<PathBuf> {
        let rel = Path::new(key);
        let escapes = key.is_empty()
            || rel
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(rel))
    }

    /// Errors meaning nothing usable sits at the path
    fn is_missing(e: &std::io::Error) -> bool {
        matches!(
            e.kind(),
            std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
        )
    }

    fn map_not_found(key: &str, e: std::io::Error) -> StorageError {
        if Self::is_missing(&e) {
            StorageError::NotFound(key.to_string())
        } else {
            StorageError::Io(e)
        }
    }

    /// Metadata of a regular file stored under the key
    async fn file_metadata(&self, key: &str) -> StorageResult<std::fs::Metadata> {
        let path = self.key_path(key)?;
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| Self::map_not_found(key, e))?;
        if !metadata.is_file() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(metadata)
    }
}

#[async_trait]
impl AssetStorage for LocalStorage {
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        match self.file_metadata(key).await {
            Ok(_) => Ok(true),
            Err(StorageError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn size(&self, key: &str) -> StorageResult<u64> {
        Ok(self.file_metadata(key).await?.len())
    }

    async fn open(&self, key: &str) -> StorageResult<Box<dyn tokio::io::AsyncRead + Unpin + Send>> {
        let path = self.key_path(key)?;
        let file = fs::File::open(&path)
            .await
            .map_err(|e| Self::map_not_found(key, e))?;
        // Directories open fine on unix; only regular files are assets
        if !file.metadata().await?.is_file() {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_local_storage_basic() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("door.png"), b"png bytes").await.unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.exists("door.png").await.unwrap());
        assert!(!storage.exists("missing.png").await.unwrap());
        assert_eq!(storage.size("door.png").await.unwrap(), 9);

        let mut reader = storage.open("door.png").await.unwrap();
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.unwrap();
        assert_eq!(buf, b"png bytes");
    }

    #[tokio::test]
    async fn test_local_storage_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());

        assert!(matches!(
            storage.open("nope.png").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.size("nope.png").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_local_storage_rejects_escaping_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("assets"));

        for key in ["../secret.txt", "/etc/passwd", ""] {
            assert!(matches!(
                storage.exists(key).await,
                Err(StorageError::InvalidKey(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("nested")).await.unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_path_buf());

        assert!(!storage.exists("nested").await.unwrap());
        assert!(matches!(
            storage.size("nested").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.open("nested").await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_root_that_is_a_file_holds_nothing() {
        let root = tempfile::NamedTempFile::new().unwrap();
        let storage = LocalStorage::new(root.path().to_path_buf());

        assert!(!storage.exists("door.png").await.unwrap());
        assert!(matches!(
            storage.size("door.png").await,
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            storage.open("door.png").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
