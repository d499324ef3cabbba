//! # docvault-database
//!
//! Metadata stores for DocVault. The [`DocumentStore`](repositories::DocumentStore)
//! trait has three implementations: a JSON file store (the default), a
//! PostgreSQL store that migrates its own schema on connect, and an
//! in-memory store for tests.

pub mod repositories;

pub use repositories::{DocumentStore, JsonDocumentStore, MemoryDocumentStore, PgDocumentStore};
