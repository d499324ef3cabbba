//! Metadata store implementations for the document record.

pub mod document;
pub mod json;
pub mod memory;

pub use document::PgDocumentStore;
pub use json::JsonDocumentStore;
pub use memory::MemoryDocumentStore;

use docvault_core::traits::Repository;
use docvault_core::types::DocumentId;
use docvault_entity::document::{Document, NewDocument};

/// The keyed record store the document service depends on.
pub trait DocumentStore: Repository<Document, NewDocument, DocumentId> {}

impl<T> DocumentStore for T where T: Repository<Document, NewDocument, DocumentId> {}
