use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::DownloadError;

/// A file written by a [`FileDownloader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Capability to persist downloaded content for the user.
#[async_trait]
pub trait FileDownloader: Send + Sync {
    /// Store `bytes` under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError::Io` if the file cannot be written.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<DownloadedFile, DownloadError>;
}

/// Writes downloads into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsDownloader {
    dir: PathBuf,
}

impl FsDownloader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FileDownloader for FsDownloader {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<DownloadedFile, DownloadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        // Only the final component is honoured.
        let name = Path::new(file_name)
            .file_name()
            .map_or_else(|| PathBuf::from("download.pdf"), PathBuf::from);
        let path = self.dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "file saved");
        Ok(DownloadedFile {
            path,
            bytes: bytes.len(),
        })
    }
}
