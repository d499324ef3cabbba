//! Generic repository trait for metadata store access.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic keyed record store.
///
/// `New` is the creation payload without an identifier; the store assigns the
/// identifier in [`Repository::create`]. Entity-specific stores are
/// implemented in `docvault-database`.
#[async_trait]
pub trait Repository<Entity, New, Id>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static,
    New: Send + Sync + 'static,
    Id: Send + Sync + 'static,
{
    /// Persist a new record and return it with its assigned identifier.
    async fn create(&self, new: &New) -> AppResult<Entity>;

    /// Find a record by its identifier.
    async fn find_by_id(&self, id: Id) -> AppResult<Option<Entity>>;

    /// Return every record, in whatever order the store provides.
    async fn find_all(&self) -> AppResult<Vec<Entity>>;

    /// Insert or update a record and return the stored version.
    async fn save(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete a record by its identifier. Returns `true` if a record was removed.
    async fn delete_by_id(&self, id: Id) -> AppResult<bool>;
}
