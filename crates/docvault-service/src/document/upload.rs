//! Document upload.
//!
//! The record is created first so the store can assign the identifier that
//! names the physical file. If the file cannot be written the record is
//! deleted again. A crash between the two steps leaves a record without a
//! file; that gap is accepted and not repaired here.

use bytes::Bytes;
use tracing::{error, info, warn};

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_entity::document::{Document, NewDocument};

use crate::validation::ExtensionValidator;

use super::service::DocumentService;

impl DocumentService {
    /// Stores `data` under `original_file_name` and returns the new record.
    pub async fn upload(&self, data: Bytes, original_file_name: &str) -> AppResult<Document> {
        ExtensionValidator::validate_display_name(original_file_name)?;
        let extension = self.validator.validate(original_file_name)?;

        let new_document = NewDocument {
            file_name: original_file_name.to_string(),
            extension,
            file_size: data.len() as i64,
            file_path: self.directory(),
        };

        let document = self.store.create(&new_document).await?;
        let _guard = self.locks.lock(document.id).await;

        if let Err(e) = self.write_physical(&document, data).await {
            self.compensate_upload(&document).await;
            return Err(e);
        }

        info!(
            document_id = %document.id,
            file_name = %document.file_name,
            size = document.file_size,
            "Document uploaded"
        );

        Ok(document)
    }

    /// Writes the physical file for a freshly created record.
    async fn write_physical(&self, document: &Document, data: Bytes) -> AppResult<()> {
        self.storage
            .create_root()
            .await
            .map_err(|e| e.into_kind(ErrorKind::StorageWriteFailed, "File cannot be uploaded!"))?;

        let stale = self
            .locator
            .find_all(document.id)
            .await
            .map_err(|e| e.into_kind(ErrorKind::StorageWriteFailed, "File cannot be uploaded!"))?;

        if let Some(existing) = stale.first() {
            warn!(
                document_id = %document.id,
                file = %existing.name,
                "Stale file already uses this document id"
            );
            return Err(AppError::storage_write_failed(format!(
                "File cannot be uploaded! {} already exists for document {}",
                existing.name, document.id
            )));
        }

        let name = document.physical_name();
        if let Err(e) = self.storage.write(&name, data).await {
            // A partial write would otherwise be an orphan file.
            if let Err(cleanup) = self.storage.delete(&name).await {
                if cleanup.kind != ErrorKind::FileNotFound {
                    warn!(file = %name, error = %cleanup, "Failed to remove partial upload");
                }
            }
            return Err(e.into_kind(ErrorKind::StorageWriteFailed, "File cannot be uploaded!"));
        }

        Ok(())
    }

    /// Deletes the record of an upload whose physical write failed.
    async fn compensate_upload(&self, document: &Document) {
        match self.store.delete_by_id(document.id).await {
            Ok(_) => warn!(
                document_id = %document.id,
                "Removed document record after failed upload"
            ),
            Err(e) => error!(
                document_id = %document.id,
                error = %e,
                "Failed to remove record of failed upload; record has no file"
            ),
        }
    }
}
