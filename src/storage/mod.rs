//! Transient upload storage
//!
//! Local filesystem scratch buffer for the lifetime of one request. Uploads
//! are spooled under a random identifier with the original extension; the
//! client-supplied filename never becomes a path component.

use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct TransientStorage {
    root: PathBuf,
}

impl TransientStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure the storage directory exists
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Fully materialize the upload body under a fresh random identifier,
    /// keeping only the extension of the original filename. Returns a handle
    /// used for parsing and cleanup.
    pub async fn spool(&self, filename: &str, data: &[u8]) -> std::io::Result<SpooledFile> {
        self.ensure_dir().await?;

        let id = Uuid::new_v4();
        let name = match Path::new(filename).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", id, ext.to_lowercase()),
            None => id.to_string(),
        };
        let path = self.root.join(name);
        fs::write(&path, data).await?;

        Ok(SpooledFile { path })
    }
}

/// Handle to one spooled upload. Consumed by `remove`, which the upload
/// handler calls on every exit path once parsing and insertion have been
/// attempted.
#[derive(Debug)]
pub struct SpooledFile {
    path: PathBuf,
}

impl SpooledFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn remove(self) -> std::io::Result<()> {
        fs::remove_file(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn spool_uses_random_name_with_original_extension() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TransientStorage::new(temp_dir.path());

        let spooled = storage.spool("sample.HTML", b"<html></html>").await.unwrap();

        assert!(spooled.path().exists());
        assert_eq!(spooled.path().parent().unwrap(), temp_dir.path());
        let name = spooled.path().file_name().unwrap().to_str().unwrap();
        assert_ne!(name, "sample.HTML");
        assert!(name.ends_with(".html"));
    }

    #[tokio::test]
    async fn spool_never_escapes_the_storage_root() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TransientStorage::new(temp_dir.path());

        let spooled = storage
            .spool("../../../etc/passwd.html", b"owned")
            .await
            .unwrap();

        assert_eq!(spooled.path().parent().unwrap(), temp_dir.path());
    }

    #[tokio::test]
    async fn remove_deletes_the_spooled_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TransientStorage::new(temp_dir.path());

        let spooled = storage.spool("manual.pdf", b"%PDF-").await.unwrap();
        let path = spooled.path().to_path_buf();

        spooled.remove().await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn spool_handles_filenames_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        let storage = TransientStorage::new(temp_dir.path());

        let spooled = storage.spool("README", b"text").await.unwrap();
        assert!(spooled.path().exists());
    }
}
