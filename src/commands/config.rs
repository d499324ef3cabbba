//! Configuration display command.

use docvault_core::config::AppConfig;
use docvault_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Execute the config command
pub fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let mut shown = config.clone();
    shown.database.url = config.database.redacted_url();

    match format {
        OutputFormat::Json => output::print_json(&shown, "{}"),
        OutputFormat::Table => {
            println!("Storage:");
            output::print_kv(
                "Directory",
                &shown.storage.resolved_directory().display().to_string(),
            );
            output::print_kv("Accepted extensions", &shown.storage.accepted_extensions);
            println!("Database:");
            output::print_kv("URL", &shown.database.url);
            output::print_kv(
                "Connections",
                &format!(
                    "{}..{}",
                    shown.database.min_connections, shown.database.max_connections
                ),
            );
            println!("Logging:");
            output::print_kv("Level", &shown.logging.level);
            output::print_kv("Format", &shown.logging.format);
        }
    }

    Ok(())
}
