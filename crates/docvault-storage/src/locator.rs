//! Resolves a document identifier to its physical file.
//!
//! Physical files are named `"<id>#<display name>"`, so the directory can be
//! searched by identifier without persisting full paths. Exactly one entry
//! may carry a given prefix; zero or several matches are both lookup errors.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::storage::StorageProvider;
use docvault_core::types::DocumentId;

/// A physical file found in the storage directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedFile {
    /// Entry name inside the storage directory.
    pub name: String,
    /// Absolute path of the entry.
    pub path: PathBuf,
}

/// Finds physical files by identifier prefix.
#[derive(Debug, Clone)]
pub struct FileLocator {
    storage: Arc<dyn StorageProvider>,
}

impl FileLocator {
    /// Creates a locator over the given storage directory.
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Every entry whose name starts with `"<id>#"`. Listing errors are
    /// returned unchanged.
    pub async fn find_all(&self, id: DocumentId) -> AppResult<Vec<LocatedFile>> {
        let prefix = id.physical_prefix();
        let names = self.storage.list_names().await?;

        Ok(names
            .into_iter()
            .filter(|name| name.starts_with(&prefix))
            .map(|name| LocatedFile {
                path: self.storage.resolve(&name),
                name,
            })
            .collect())
    }

    /// The single physical file of a document.
    pub async fn locate(&self, id: DocumentId) -> AppResult<LocatedFile> {
        let mut matches = self.find_all(id).await.map_err(|e| {
            e.into_kind(
                ErrorKind::FileNotFound,
                format!("Storage directory unavailable while locating document {id}"),
            )
        })?;

        match matches.len() {
            0 => Err(AppError::file_not_found(format!(
                "No file stored for document {id}"
            ))),
            1 => Ok(matches.remove(0)),
            n => {
                warn!(%id, matches = n, "Several physical files share one document id");
                Err(AppError::file_not_found(format!(
                    "Document {id} is ambiguous: {n} files match"
                )))
            }
        }
    }
}
