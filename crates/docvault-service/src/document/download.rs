//! Document download with container normalization.

use bytes::Bytes;
use tracing::{debug, warn};

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::types::DocumentId;
use docvault_storage::export::{ContainerFormat, ExportEncoder};

use super::service::DocumentService;

/// Display name and content of a downloaded document.
#[derive(Debug, Clone)]
pub struct DownloadedDocument {
    /// Display name, including extension.
    pub file_name: String,
    /// Content bytes. Raw for most formats, re-serialized for containers.
    pub data: Bytes,
}

impl DocumentService {
    /// Reads a document. Never modifies the stored file.
    pub async fn download(&self, id: DocumentId) -> AppResult<DownloadedDocument> {
        let _guard = self.locks.lock(id).await;

        let document = self.find_document(id).await?;
        let located = self.locator.locate(id).await?;

        if located.name != document.physical_name() {
            warn!(
                document_id = %id,
                expected = %document.physical_name(),
                found = %located.name,
                "Physical file name differs from record"
            );
        }

        let raw = self.storage.read_bytes(&located.name).await.map_err(|e| {
            if e.kind == ErrorKind::FileNotFound {
                e
            } else {
                e.into_kind(
                    ErrorKind::ExportFailed,
                    format!("Failed to read file of document {id}"),
                )
            }
        })?;

        let data = match ContainerFormat::from_extension(&document.extension) {
            Some(format) => {
                debug!(document_id = %id, %format, "Re-serializing container for export");
                tokio::task::spawn_blocking(move || ExportEncoder::encode(format, &raw))
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::ExportFailed, "Export task failed", e)
                    })??
            }
            None => raw,
        };

        Ok(DownloadedDocument {
            file_name: document.file_name,
            data,
        })
    }
}
