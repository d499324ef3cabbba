//! PostgreSQL document store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use docvault_core::config::DatabaseConfig;
use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::Repository;
use docvault_core::types::DocumentId;
use docvault_entity::document::{Document, NewDocument};

/// Repository for document records backed by the `document` table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a new document store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and bring the `document` table up to
    /// date, so the store is usable without a separate migration step.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %config.redacted_url(),
            max_connections = config.max_connections,
            "Opening PostgreSQL document store"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Cannot reach document database at {}", config.redacted_url()),
                    e,
                )
            })?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Apply pending schema migrations from `migrations/`.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Document schema migration failed", e)
            })?;
        info!("Document schema is current");
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Repository<Document, NewDocument, DocumentId> for PgDocumentStore {
    async fn create(&self, new: &NewDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO document (file_name, extension, file_size, file_path) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&new.file_name)
        .bind(&new.extension)
        .bind(new.file_size)
        .bind(&new.file_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create document", e))
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM document WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>("SELECT * FROM document ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    async fn save(&self, document: &Document) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(
            "INSERT INTO document (id, file_name, extension, file_size, file_path) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET file_name = EXCLUDED.file_name, \
             extension = EXCLUDED.extension, file_size = EXCLUDED.file_size, \
             file_path = EXCLUDED.file_path \
             RETURNING *",
        )
        .bind(document.id)
        .bind(&document.file_name)
        .bind(&document.extension)
        .bind(document.file_size)
        .bind(&document.file_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save document", e))
    }

    async fn delete_by_id(&self, id: DocumentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM document WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
