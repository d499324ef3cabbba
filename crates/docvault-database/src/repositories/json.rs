//! Document store persisted as a single JSON file.
//!
//! The file holds the identifier counter and every record. Each operation
//! reads the file, applies its change, and replaces the file through a
//! temporary sibling and a rename, so a crash mid-write leaves the previous
//! version intact. The counter never moves backwards, so identifiers of
//! deleted documents are not handed out again.
//!
//! Operations through one store instance are serialized. Separate processes
//! sharing the file are not coordinated.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::Repository;
use docvault_core::types::DocumentId;
use docvault_entity::document::{Document, NewDocument};

/// On-disk layout of the store file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    next_id: i64,
    documents: Vec<Document>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            next_id: 1,
            documents: Vec::new(),
        }
    }
}

impl StoreFile {
    fn position(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }
}

/// Document store kept in a JSON file.
#[derive(Debug)]
pub struct JsonDocumentStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonDocumentStore {
    /// Open the store at `path`, creating its parent directory. A missing
    /// file is an empty store; an unreadable one is an error.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot create store directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let store = Self {
            path,
            guard: Mutex::new(()),
        };
        store.load().await?;
        debug!(path = %store.path.display(), "Opened JSON document store");
        Ok(store)
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> AppResult<StoreFile> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreFile::default());
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot read store file {}", self.path.display()),
                    e,
                ));
            }
        };

        serde_json::from_slice(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Store file {} is corrupt", self.path.display()),
                e,
            )
        })
    }

    async fn persist(&self, file: &StoreFile) -> AppResult<()> {
        let body = serde_json::to_vec_pretty(file)?;
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        let write_failed = |e: std::io::Error| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Cannot write store file {}", self.path.display()),
                e,
            )
        };

        fs::write(&temp, &body).await.map_err(write_failed)?;
        fs::rename(&temp, &self.path).await.map_err(write_failed)
    }
}

#[async_trait]
impl Repository<Document, NewDocument, DocumentId> for JsonDocumentStore {
    async fn create(&self, new: &NewDocument) -> AppResult<Document> {
        let _guard = self.guard.lock().await;
        let mut file = self.load().await?;

        let id = DocumentId(file.next_id);
        file.next_id = file.next_id.saturating_add(1);
        let document = new.clone().into_document(id);
        file.documents.push(document.clone());

        self.persist(&file).await?;
        debug!(%id, "Created document record");
        Ok(document)
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        let _guard = self.guard.lock().await;
        let file = self.load().await?;
        Ok(file.documents.into_iter().find(|d| d.id == id))
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        let _guard = self.guard.lock().await;
        let mut documents = self.load().await?.documents;
        documents.sort_by_key(|d| d.id);
        Ok(documents)
    }

    async fn save(&self, document: &Document) -> AppResult<Document> {
        let _guard = self.guard.lock().await;
        let mut file = self.load().await?;

        match file.position(document.id) {
            Some(i) => file.documents[i] = document.clone(),
            None => file.documents.push(document.clone()),
        }
        file.next_id = file.next_id.max(document.id.value().saturating_add(1));

        self.persist(&file).await?;
        Ok(document.clone())
    }

    async fn delete_by_id(&self, id: DocumentId) -> AppResult<bool> {
        let _guard = self.guard.lock().await;
        let mut file = self.load().await?;

        let Some(i) = file.position(id) else {
            return Ok(false);
        };
        file.documents.remove(i);

        self.persist(&file).await?;
        Ok(true)
    }
}
