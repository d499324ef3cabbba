//! Document listing command.

use docvault_core::error::AppError;
use docvault_service::DocumentService;

use crate::output::{self, OutputFormat};

/// Execute the list command
pub async fn execute(service: &DocumentService, format: OutputFormat) -> Result<(), AppError> {
    let documents = service.list_all().await?;
    output::print_documents(&documents, format);
    Ok(())
}
