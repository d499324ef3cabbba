//! In-process document store.
//!
//! Identifiers come from a counter starting at 1, mirroring a database
//! sequence. Records are kept in identifier order, so `find_all` is stable.
//! Nothing survives the process.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use docvault_core::result::AppResult;
use docvault_core::traits::Repository;
use docvault_core::types::DocumentId;
use docvault_entity::document::{Document, NewDocument};

/// Document store held entirely in memory.
#[derive(Debug)]
pub struct MemoryDocumentStore {
    records: RwLock<BTreeMap<DocumentId, Document>>,
    next_id: AtomicI64,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Document, NewDocument, DocumentId> for MemoryDocumentStore {
    async fn create(&self, new: &NewDocument) -> AppResult<Document> {
        let id = DocumentId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let document = new.clone().into_document(id);
        self.records.write().await.insert(id, document.clone());
        debug!(%id, "Created document record");
        Ok(document)
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn save(&self, document: &Document) -> AppResult<Document> {
        // Keep the counter ahead of explicitly supplied identifiers.
        self.next_id
            .fetch_max(document.id.value().saturating_add(1), Ordering::SeqCst);
        self.records
            .write()
            .await
            .insert(document.id, document.clone());
        Ok(document.clone())
    }

    async fn delete_by_id(&self, id: DocumentId) -> AppResult<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }
}
