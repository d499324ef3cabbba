//! Database migration command.

use docvault_core::config::{AppConfig, StoreBackend};
use docvault_core::error::AppError;
use docvault_database::PgDocumentStore;

use crate::output;

/// Execute the migrate command
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.backend() != StoreBackend::Postgres {
        output::print_warning("Only the PostgreSQL metadata store has a schema to migrate.");
        return Ok(());
    }

    println!("Running database migrations...");
    let store = PgDocumentStore::connect(&config.database).await?;
    store.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
