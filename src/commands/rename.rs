//! Document rename CLI command.

use clap::Args;

use docvault_core::error::AppError;
use docvault_core::types::DocumentId;
use docvault_service::DocumentService;

use crate::output::{self, OutputFormat};

/// Arguments for the rename command
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Document ID
    pub id: DocumentId,

    /// New display name without extension; the stored extension is kept
    pub new_base_name: String,
}

/// Execute the rename command
pub async fn execute(
    args: &RenameArgs,
    service: &DocumentService,
    format: OutputFormat,
) -> Result<(), AppError> {
    let document = service.rename(args.id, &args.new_base_name).await?;

    if format == OutputFormat::Table {
        output::print_success(&format!(
            "Document {} renamed to '{}'",
            document.id, document.file_name
        ));
    }
    output::print_document(&document, format);

    Ok(())
}
