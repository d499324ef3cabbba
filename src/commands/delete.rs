//! Document delete CLI command.

use clap::Args;

use docvault_core::error::AppError;
use docvault_core::types::DocumentId;
use docvault_service::DocumentService;

use crate::output;

/// Arguments for the delete command
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Document ID
    pub id: DocumentId,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the delete command
pub async fn execute(args: &DeleteArgs, service: &DocumentService) -> Result<(), AppError> {
    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete document {} and its stored file? This cannot be undone.",
                args.id
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    service.delete(args.id).await?;
    output::print_success(&format!("Document {} deleted", args.id));

    Ok(())
}
