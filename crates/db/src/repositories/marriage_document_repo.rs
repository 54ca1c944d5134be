//! Repository for the `marriage_documents` table.

use ccb_core::types::DbId;
use sqlx::PgPool;

use crate::models::marriage_document::{
    CreateMarriageDocument, MarriageDocument, UpdateMarriageDocument,
};
use crate::update::{Changeset, PartialUpdate};

const COLUMNS: &str = "id, marriage_id, document_type, file_name, file_path, file_size, \
                       uploaded_at, updated_at";

/// Provides CRUD operations for marriage document metadata.
pub struct MarriageDocumentRepo;

impl MarriageDocumentRepo {
    /// Record an uploaded document, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMarriageDocument,
    ) -> Result<MarriageDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO marriage_documents
                (marriage_id, document_type, file_name, file_path, file_size)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarriageDocument>(&query)
            .bind(input.marriage_id)
            .bind(&input.document_type)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(input.file_size)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarriageDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marriage_documents WHERE id = $1");
        sqlx::query_as::<_, MarriageDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a document by its stored file name.
    pub async fn find_by_file_path(
        pool: &PgPool,
        file_path: &str,
    ) -> Result<Option<MarriageDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marriage_documents WHERE file_path = $1");
        sqlx::query_as::<_, MarriageDocument>(&query)
            .bind(file_path)
            .fetch_optional(pool)
            .await
    }

    /// List all documents, newest upload first.
    pub async fn list(pool: &PgPool) -> Result<Vec<MarriageDocument>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM marriage_documents ORDER BY uploaded_at DESC, id DESC");
        sqlx::query_as::<_, MarriageDocument>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_marriage(
        pool: &PgPool,
        marriage_id: DbId,
    ) -> Result<Vec<MarriageDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marriage_documents
             WHERE marriage_id = $1
             ORDER BY uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, MarriageDocument>(&query)
            .bind(marriage_id)
            .fetch_all(pool)
            .await
    }

    /// Documents of several marriages at once.
    pub async fn list_by_marriages(
        pool: &PgPool,
        marriage_ids: &[DbId],
    ) -> Result<Vec<MarriageDocument>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marriage_documents
             WHERE marriage_id = ANY($1)
             ORDER BY marriage_id, uploaded_at DESC, id DESC"
        );
        sqlx::query_as::<_, MarriageDocument>(&query)
            .bind(marriage_ids)
            .fetch_all(pool)
            .await
    }

    /// Update document metadata. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMarriageDocument,
    ) -> Result<Option<MarriageDocument>, sqlx::Error> {
        let mut update = PartialUpdate::new("marriage_documents", "id");
        input.apply(&mut update);
        if update.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        update.fetch_optional(pool, id, COLUMNS).await
    }

    /// Delete a document row, returning it so the caller can remove the file.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarriageDocument>, sqlx::Error> {
        let query = format!("DELETE FROM marriage_documents WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, MarriageDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
