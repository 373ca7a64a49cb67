//! Local filesystem storage client
//!
//! All stored files live directly under a single root directory. Names are
//! never interpreted as paths: lookups are joined onto the root and the
//! canonical result must stay inside the canonical root.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("'{0}' resolves outside the storage root")]
    Escapes(String),
}

/// Filesystem gateway for the uploads directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory (and parents) if missing
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    pub async fn root_exists(&self) -> Result<bool, StorageError> {
        Ok(fs::try_exists(&self.root).await?)
    }

    /// Ask the OS whether this process may write into the root directory.
    /// Does not write anything.
    pub async fn is_root_writable(&self) -> bool {
        let root = self.root.clone();
        match tokio::task::spawn_blocking(move || has_write_access(&root)).await {
            Ok(writable) => writable,
            Err(e) => {
                warn!("Write access check panicked: {}", e);
                false
            }
        }
    }

    /// Write `bytes` to `<root>/<name>`, failing with `AlreadyExists` if the
    /// name is taken.
    pub async fn write_new(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        let path = self.root.join(name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;
        drop(file);
        discard_partial(&path, written).await?;

        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// Resolve a stored name to its on-disk path.
    ///
    /// `Ok(None)` when nothing is stored under `name`.
    pub async fn resolve(&self, name: &str) -> Result<Option<PathBuf>, StorageError> {
        let candidate = self.root.join(name);
        let resolved = match fs::canonicalize(&candidate).await {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let root = fs::canonicalize(&self.root).await?;
        if !resolved.starts_with(&root) {
            return Err(StorageError::Escapes(name.to_string()));
        }

        if !fs::metadata(&resolved).await?.is_file() {
            return Ok(None);
        }

        Ok(Some(resolved))
    }

    pub async fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        Ok(fs::read(path).await?)
    }
}

#[cfg(unix)]
fn has_write_access(path: &Path) -> bool {
    path.is_dir() && rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn has_write_access(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| meta.is_dir() && !meta.permissions().readonly())
        .unwrap_or(false)
}

/// Remove a file whose contents could not be written in full
async fn discard_partial(path: &Path, written: io::Result<()>) -> Result<(), StorageError> {
    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(path).await {
            warn!(
                "Failed to remove partial file {}: {}",
                path.display(),
                remove_err
            );
        }
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_ensure_root_creates_nested_directories() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("a").join("uploads"));

        assert!(!storage.root_exists().await.unwrap());
        assert_ok!(storage.ensure_root().await);
        assert!(storage.root_exists().await.unwrap());
        assert!(storage.is_root_writable().await);

        // Idempotent
        assert_ok!(storage.ensure_root().await);
    }

    #[tokio::test]
    async fn test_missing_root_is_not_writable() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missing"));
        assert!(!storage.is_root_writable().await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_writable_matches_an_actual_write() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("uploads");
        std::fs::create_dir(&root).unwrap();
        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o555)).unwrap();

        // Root may write regardless of the mode bits
        let storage = LocalStorage::new(&root);
        let reported = storage.is_root_writable().await;
        let actual = std::fs::write(root.join("check"), b"x").is_ok();
        std::fs::set_permissions(&root, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(reported, actual);
    }

    #[tokio::test]
    async fn test_discard_partial_removes_file_on_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("image-1.png");
        std::fs::write(&path, b"trunc").unwrap();

        let result = discard_partial(&path, Err(io::Error::other("disk full"))).await;

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_discard_partial_keeps_file_on_success() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("image-1.png");
        std::fs::write(&path, b"pixels").unwrap();

        assert_ok!(discard_partial(&path, Ok(())).await);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_write_then_resolve_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let written = storage.write_new("image-1.png", b"pixels").await.unwrap();
        assert!(written.ends_with("image-1.png"));

        let resolved = storage.resolve("image-1.png").await.unwrap().unwrap();
        assert_eq!(storage.read(&resolved).await.unwrap(), b"pixels");
    }

    #[tokio::test]
    async fn test_write_new_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_new("image-1.png", b"first").await.unwrap();
        match storage.write_new("image-1.png", b"second").await {
            Err(StorageError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::AlreadyExists),
            other => panic!("expected AlreadyExists, got {:?}", other),
        }

        let resolved = storage.resolve("image-1.png").await.unwrap().unwrap();
        assert_eq!(storage.read(&resolved).await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_resolve_missing_returns_none() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(storage.resolve("nope.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_directory_returns_none() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("nested")).unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(storage.resolve("nested").await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_resolve_rejects_symlink_escaping_root() {
        let outside = TempDir::new().unwrap();
        std::fs::write(outside.path().join("secret.png"), b"secret").unwrap();

        let tmp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret.png"),
            tmp.path().join("link.png"),
        )
        .unwrap();

        let storage = LocalStorage::new(tmp.path());
        assert!(matches!(
            storage.resolve("link.png").await,
            Err(StorageError::Escapes(_))
        ));
    }
}
