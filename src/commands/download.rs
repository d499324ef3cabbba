//! File download CLI command.

use std::path::PathBuf;

use clap::Args;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::types::DocumentId;
use docvault_service::DocumentService;

use crate::output;

/// Arguments for the download command
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Document ID
    pub id: DocumentId,

    /// Destination path (defaults to the display name in the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the download command
pub async fn execute(args: &DownloadArgs, service: &DocumentService) -> Result<(), AppError> {
    let downloaded = service.download(args.id).await?;

    let target = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&downloaded.file_name));

    tokio::fs::write(&target, &downloaded.data)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write {}", target.display()),
                e,
            )
        })?;

    output::print_success(&format!(
        "Document {} saved to {} ({} bytes)",
        args.id,
        target.display(),
        downloaded.data.len()
    ));

    Ok(())
}
