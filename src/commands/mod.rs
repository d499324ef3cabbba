//! CLI command definitions and dispatch.

pub mod config;
pub mod delete;
pub mod download;
pub mod list;
pub mod migrate;
pub mod rename;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use docvault_core::config::{AppConfig, StoreBackend};
use docvault_core::error::AppError;
use docvault_core::traits::StorageProvider;
use docvault_database::{DocumentStore, JsonDocumentStore, PgDocumentStore};
use docvault_service::{DocumentService, ExtensionValidator};
use docvault_storage::providers::LocalStorageProvider;

use crate::output::OutputFormat;

/// DocVault: document storage with consistent metadata and files
#[derive(Debug, Parser)]
#[command(name = "docvault", version, about, long_about = None)]
pub struct Cli {
    /// Path to the base configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from `config/<ENV>`
    #[arg(short, long, default_value = "development", env = "DOCVAULT_ENV")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every stored document
    List,
    /// Upload a local file
    Upload(upload::UploadArgs),
    /// Download a document to a local file
    Download(download::DownloadArgs),
    /// Change a document's display name
    Rename(rename::RenameArgs),
    /// Delete a document and its file
    Delete(delete::DeleteArgs),
    /// Apply PostgreSQL schema migrations
    Migrate,
    /// Show the effective configuration
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Config => config::execute(&config, self.format),
            command => {
                let service = build_service(&config).await?;
                match command {
                    Commands::List => list::execute(&service, self.format).await,
                    Commands::Upload(args) => upload::execute(args, &service, self.format).await,
                    Commands::Download(args) => download::execute(args, &service).await,
                    Commands::Rename(args) => rename::execute(args, &service, self.format).await,
                    Commands::Delete(args) => delete::execute(args, &service).await,
                    Commands::Migrate | Commands::Config => Ok(()),
                }
            }
        }
    }
}

/// Helper: open the metadata store selected by the database URL
pub async fn create_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, AppError> {
    match config.database.backend() {
        StoreBackend::Json(path) => {
            info!(path = %path.display(), "Using JSON metadata store");
            Ok(Arc::new(JsonDocumentStore::open(path).await?))
        }
        StoreBackend::Postgres => Ok(Arc::new(PgDocumentStore::connect(&config.database).await?)),
        StoreBackend::Memory => Err(AppError::configuration(
            "memory:// keeps records only until the command exits; \
             configure a json:// or postgres:// database URL",
        )),
    }
}

/// Helper: wire the document service from configuration
pub async fn build_service(config: &AppConfig) -> Result<DocumentService, AppError> {
    let store = create_store(config).await?;

    let directory = config.storage.resolved_directory();
    let storage = LocalStorageProvider::new(directory);
    info!(
        provider = storage.provider_type(),
        directory = %storage.root().display(),
        "Storage directory configured"
    );

    let validator = ExtensionValidator::new(&config.storage.accepted_extensions)?;

    Ok(DocumentService::new(store, Arc::new(storage), validator))
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use docvault_core::error::ErrorKind;

    use super::*;

    fn config_in(dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.storage.directory = dir.join("documents").display().to_string();
        config.database.url = format!("json://{}", dir.join("documents.json").display());
        config
    }

    #[tokio::test]
    async fn test_records_persist_across_invocations() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let first = build_service(&config).await.unwrap();
        let uploaded = first.upload(Bytes::from("hello"), "x.txt").await.unwrap();
        drop(first);

        let second = build_service(&config).await.unwrap();
        assert_eq!(second.list_all().await.unwrap(), vec![uploaded.clone()]);
        let downloaded = second.download(uploaded.id).await.unwrap();
        assert_eq!(downloaded.file_name, "x.txt");
        assert_eq!(downloaded.data, Bytes::from("hello"));

        let next = second.upload(Bytes::from("world"), "y.txt").await.unwrap();
        assert_ne!(next.id, uploaded.id);
    }

    #[tokio::test]
    async fn test_memory_store_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.database.url = "memory://".to_string();

        let err = build_service(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
