//! # docvault-service
//!
//! The document storage service. [`DocumentService`] keeps each metadata
//! record and its physical file consistent across upload, download, rename,
//! and delete, using compensating actions where the two sides cannot be
//! updated atomically.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod document;
pub mod lock;
pub mod validation;

pub use document::{DocumentService, DownloadedDocument};
pub use lock::{KeyedLockGuard, KeyedLocks};
pub use validation::ExtensionValidator;
