//! # docvault-entity
//!
//! Domain entity models for DocVault. The document record is the only
//! entity; it derives `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! `sqlx::FromRow` for the PostgreSQL store.

pub mod document;
