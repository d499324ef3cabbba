//! Core document operations: construction, listing, rename, and delete.
//!
//! Every operation that touches a physical file holds the per-identifier
//! lock from lookup until the metadata record is persisted. Physical changes
//! happen before record changes, so a failed filesystem step never leaves a
//! record pointing at a file that does not exist.

use std::sync::Arc;

use tracing::{error, info, warn};

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::StorageProvider;
use docvault_core::types::DocumentId;
use docvault_database::repositories::DocumentStore;
use docvault_entity::document::Document;
use docvault_storage::locator::FileLocator;

use crate::lock::KeyedLocks;
use crate::validation::ExtensionValidator;

/// Keeps document records and their physical files consistent.
#[derive(Clone)]
pub struct DocumentService {
    /// Metadata store.
    pub(crate) store: Arc<dyn DocumentStore>,
    /// Storage directory.
    pub(crate) storage: Arc<dyn StorageProvider>,
    /// Identifier-prefix lookup over `storage`.
    pub(crate) locator: FileLocator,
    /// Accepted-extension check applied on upload.
    pub(crate) validator: ExtensionValidator,
    /// Per-identifier mutual exclusion.
    pub(crate) locks: Arc<KeyedLocks<DocumentId>>,
}

impl std::fmt::Debug for DocumentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentService")
            .field("directory", &self.storage.root())
            .finish()
    }
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        storage: Arc<dyn StorageProvider>,
        validator: ExtensionValidator,
    ) -> Self {
        Self {
            store,
            locator: FileLocator::new(Arc::clone(&storage)),
            storage,
            validator,
            locks: Arc::new(KeyedLocks::new()),
        }
    }

    /// The storage directory recorded in every document's `file_path`.
    pub fn directory(&self) -> String {
        self.storage.root().display().to_string()
    }

    /// Lists every document record.
    pub async fn list_all(&self) -> AppResult<Vec<Document>> {
        self.store.find_all().await
    }

    /// Renames a document's display name, keeping its extension.
    ///
    /// The physical file is renamed first; the record is only updated once
    /// that succeeded. If persisting the record fails, the physical rename is
    /// reverted.
    pub async fn rename(&self, id: DocumentId, new_base_name: &str) -> AppResult<Document> {
        let _guard = self.locks.lock(id).await;

        let mut document = self.find_document(id).await?;
        let located = self.locator.locate(id).await?;

        ExtensionValidator::validate_display_name(new_base_name).map_err(|e| {
            AppError::rename_failed(format!("File Name cannot be changed: {}", e.message))
        })?;

        let new_file_name = document.renamed_file_name(new_base_name);
        let target = id.physical_name(&new_file_name);

        self.storage
            .rename(&located.name, &target)
            .await
            .map_err(|e| e.into_kind(ErrorKind::RenameFailed, "File Name cannot be changed"))?;

        let previous = std::mem::replace(&mut document.file_name, new_file_name);

        match self.store.save(&document).await {
            Ok(saved) => {
                info!(
                    document_id = %id,
                    from = %previous,
                    to = %saved.file_name,
                    "Document renamed"
                );
                Ok(saved)
            }
            Err(e) => {
                match self.storage.rename(&target, &located.name).await {
                    Ok(()) => warn!(
                        document_id = %id,
                        error = %e,
                        "Reverted physical rename after record update failed"
                    ),
                    Err(revert) => error!(
                        document_id = %id,
                        error = %e,
                        revert_error = %revert,
                        file = %target,
                        "Record update and rename revert both failed"
                    ),
                }
                Err(e)
            }
        }
    }

    /// Deletes a document: physical file first, then the record.
    ///
    /// If the file cannot be removed the record is left intact.
    pub async fn delete(&self, id: DocumentId) -> AppResult<()> {
        let _guard = self.locks.lock(id).await;

        let document = self.find_document(id).await?;
        let located = self.locator.locate(id).await?;

        self.storage.delete(&located.name).await.map_err(|e| {
            e.into_kind(ErrorKind::StorageDeleteFailed, "File cannot be deleted")
        })?;

        if let Err(e) = self.store.delete_by_id(id).await {
            error!(
                document_id = %id,
                error = %e,
                "Physical file removed but record could not be deleted"
            );
            return Err(e);
        }

        info!(document_id = %id, file_name = %document.file_name, "Document deleted");
        Ok(())
    }

    /// Loads a record or fails with `FileNotFound`.
    pub(crate) async fn find_document(&self, id: DocumentId) -> AppResult<Document> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::file_not_found(format!("Document {id} not found")))
    }
}
