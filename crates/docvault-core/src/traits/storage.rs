//! Storage provider trait for the physical side of document storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for a flat storage directory.
///
/// All names are single entries relative to [`StorageProvider::root`]; the
/// provider never creates nested paths. Implemented by
/// `LocalStorageProvider` in `docvault-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// The directory all names are relative to.
    fn root(&self) -> &Path;

    /// Absolute path of an entry.
    fn resolve(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Create the root directory if it does not exist.
    async fn create_root(&self) -> AppResult<()>;

    /// List the names of all entries in the root directory.
    async fn list_names(&self) -> AppResult<Vec<String>>;

    /// Read an entry into memory.
    async fn read_bytes(&self, name: &str) -> AppResult<Bytes>;

    /// Write bytes to an entry, creating or truncating it.
    async fn write(&self, name: &str, data: Bytes) -> AppResult<()>;

    /// Rename an entry.
    async fn rename(&self, from: &str, to: &str) -> AppResult<()>;

    /// Delete an entry.
    async fn delete(&self, name: &str) -> AppResult<()>;
}
