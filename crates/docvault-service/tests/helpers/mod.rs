//! Shared test helpers for document service integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::{Repository, StorageProvider};
use docvault_core::types::DocumentId;
use docvault_database::repositories::{DocumentStore, MemoryDocumentStore};
use docvault_entity::document::{Document, NewDocument};
use docvault_service::{DocumentService, ExtensionValidator};
use docvault_storage::providers::LocalStorageProvider;

/// Accepted extensions used by every test.
pub const ACCEPTED: &str = "pdf|docx|xlsx|txt";

/// Storage provider that can be told to fail individual operations.
#[derive(Debug)]
pub struct FaultyStorage {
    inner: LocalStorageProvider,
    pub fail_write: AtomicBool,
    pub fail_rename: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FaultyStorage {
    pub fn new(root: &Path) -> Self {
        Self {
            inner: LocalStorageProvider::new(root),
            fail_write: AtomicBool::new(false),
            fail_rename: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
        }
    }
}

fn injected(op: &str) -> AppError {
    AppError::from(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        format!("injected {op} failure"),
    ))
}

#[async_trait]
impl StorageProvider for FaultyStorage {
    fn provider_type(&self) -> &str {
        "faulty"
    }

    fn root(&self) -> &Path {
        self.inner.root()
    }

    async fn create_root(&self) -> AppResult<()> {
        self.inner.create_root().await
    }

    async fn list_names(&self) -> AppResult<Vec<String>> {
        self.inner.list_names().await
    }

    async fn read_bytes(&self, name: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(name).await
    }

    async fn write(&self, name: &str, data: Bytes) -> AppResult<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(injected("write"));
        }
        self.inner.write(name, data).await
    }

    async fn rename(&self, from: &str, to: &str) -> AppResult<()> {
        if self.fail_rename.load(Ordering::SeqCst) {
            return Err(injected("rename"));
        }
        self.inner.rename(from, to).await
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(injected("delete"));
        }
        self.inner.delete(name).await
    }
}

/// Metadata store whose `save` can be made to fail.
#[derive(Debug, Default)]
pub struct FaultyStore {
    pub inner: MemoryDocumentStore,
    pub fail_save: AtomicBool,
}

#[async_trait]
impl Repository<Document, NewDocument, DocumentId> for FaultyStore {
    async fn create(&self, new: &NewDocument) -> AppResult<Document> {
        self.inner.create(new).await
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        self.inner.find_all().await
    }

    async fn save(&self, document: &Document) -> AppResult<Document> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(AppError::database("injected save failure"));
        }
        self.inner.save(document).await
    }

    async fn delete_by_id(&self, id: DocumentId) -> AppResult<bool> {
        self.inner.delete_by_id(id).await
    }
}

/// A service over a temporary storage directory.
pub struct TestContext {
    /// Keeps the temporary directory alive.
    pub temp: tempfile::TempDir,
    pub storage: Arc<FaultyStorage>,
    pub store: Arc<FaultyStore>,
    pub service: DocumentService,
}

impl TestContext {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = Arc::new(FaultyStorage::new(&temp.path().join("documents")));
        let store = Arc::new(FaultyStore::default());
        let validator = ExtensionValidator::new(ACCEPTED).expect("Invalid test pattern");

        let service = DocumentService::new(
            Arc::clone(&store) as Arc<dyn DocumentStore>,
            Arc::clone(&storage) as Arc<dyn StorageProvider>,
            validator,
        );

        Self {
            temp,
            storage,
            store,
            service,
        }
    }

    /// Sorted names in the storage directory (empty if it does not exist).
    pub fn files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.storage.root()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Create a file in the storage directory behind the service's back.
    pub fn place_file(&self, name: &str, content: &str) {
        std::fs::create_dir_all(self.storage.root()).unwrap();
        std::fs::write(self.storage.root().join(name), content).unwrap();
    }
}

/// Build a minimal ZIP container from `(name, body)` pairs.
pub fn zip_container(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored);
    for (name, body) in entries {
        writer.start_file(name.to_string(), options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Read every entry of a ZIP container as `(name, body)` pairs.
pub fn zip_entries(data: &[u8]) -> Vec<(String, String)> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            (entry.name().to_string(), body)
        })
        .collect()
}
