//! # docvault-storage
//!
//! The physical side of document storage: the local filesystem provider,
//! the identifier-prefix [`FileLocator`], and the [`ExportEncoder`] that
//! rewrites ZIP-based office containers on download.

pub mod export;
pub mod locator;
pub mod providers;

pub use export::{ContainerFormat, ExportEncoder};
pub use locator::{FileLocator, LocatedFile};
pub use providers::LocalStorageProvider;
