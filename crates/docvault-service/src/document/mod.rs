//! Document storage service operations.

pub mod download;
pub mod service;
pub mod upload;

pub use download::DownloadedDocument;
pub use service::DocumentService;
