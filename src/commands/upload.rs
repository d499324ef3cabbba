//! File upload CLI command.

use std::path::PathBuf;

use bytes::Bytes;
use clap::Args;

use docvault_core::error::{AppError, ErrorKind};
use docvault_service::DocumentService;

use crate::output::{self, OutputFormat};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Override the display name (must keep an accepted extension)
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Execute the upload command
pub async fn execute(
    args: &UploadArgs,
    service: &DocumentService,
    format: OutputFormat,
) -> Result<(), AppError> {
    let file_name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .file
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::invalid_name(format!(
                    "Cannot derive a file name from {}",
                    args.file.display()
                ))
            })?,
    };

    let content = tokio::fs::read(&args.file).await.map_err(|e| {
        let kind = if e.kind() == std::io::ErrorKind::NotFound {
            ErrorKind::FileNotFound
        } else {
            ErrorKind::Storage
        };
        AppError::with_source(kind, format!("Failed to read {}", args.file.display()), e)
    })?;

    let document = service.upload(Bytes::from(content), &file_name).await?;

    if format == OutputFormat::Table {
        output::print_success(&format!(
            "Document '{}' uploaded (id: {}, size: {} bytes)",
            document.file_name, document.id, document.file_size
        ));
    }
    output::print_document(&document, format);

    Ok(())
}
