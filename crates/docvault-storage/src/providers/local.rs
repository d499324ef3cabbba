//! Local filesystem storage provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::storage::StorageProvider;

/// Local filesystem storage provider over a single flat directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Directory holding all physical document files.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root`. The directory is not touched until
    /// [`StorageProvider::create_root`] is called.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve an entry name, rejecting anything that is not a single
    /// component inside the root.
    fn entry_path(&self, name: &str) -> AppResult<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
        {
            return Err(AppError::storage(format!("Invalid entry name: {name:?}")));
        }
        Ok(self.root.join(name))
    }
}

/// Map an I/O error, keeping "not found" distinguishable for callers.
fn io_error(e: std::io::Error, message: String) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::with_source(ErrorKind::FileNotFound, message, e)
    } else {
        AppError::with_source(ErrorKind::Storage, message, e)
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    async fn create_root(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage directory: {}", self.root.display()),
                e,
            )
        })
    }

    async fn list_names(&self) -> AppResult<Vec<String>> {
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            io_error(
                e,
                format!("Failed to list directory: {}", self.root.display()),
            )
        })?;

        let mut names = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e))?
        {
            let file_type = entry.file_type().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry type", e)
            })?;
            if file_type.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    async fn read_bytes(&self, name: &str) -> AppResult<Bytes> {
        let path = self.entry_path(name)?;
        let data = fs::read(&path)
            .await
            .map_err(|e| io_error(e, format!("Failed to read file: {name}")))?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, name: &str, data: Bytes) -> AppResult<()> {
        let path = self.entry_path(name)?;
        fs::write(&path, &data)
            .await
            .map_err(|e| io_error(e, format!("Failed to write file: {name}")))?;

        debug!(name, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        let from_path = self.entry_path(from)?;
        let to_path = self.entry_path(to)?;

        fs::rename(&from_path, &to_path)
            .await
            .map_err(|e| io_error(e, format!("Failed to rename {from} -> {to}")))?;

        debug!(from, to, "Renamed file");
        Ok(())
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.entry_path(name)?;
        fs::remove_file(&path)
            .await
            .map_err(|e| io_error(e, format!("Failed to delete file: {name}")))?;

        debug!(name, "Deleted file");
        Ok(())
    }
}
