//! Repository for the `parishes` table.

use ccb_core::types::DbId;
use sqlx::PgPool;

use crate::models::parish::{CreateParish, Parish, UpdateParish};
use crate::update::{Changeset, PartialUpdate};

const COLUMNS: &str = "id, parish_name, deanery, created_at, updated_at";

/// Provides CRUD operations for parishes.
pub struct ParishRepo;

impl ParishRepo {
    /// Insert a new parish, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateParish) -> Result<Parish, sqlx::Error> {
        let query = format!(
            "INSERT INTO parishes (parish_name, deanery)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parish>(&query)
            .bind(&input.parish_name)
            .bind(&input.deanery)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Parish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parishes WHERE id = $1");
        sqlx::query_as::<_, Parish>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all parishes alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Parish>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parishes ORDER BY parish_name");
        sqlx::query_as::<_, Parish>(&query).fetch_all(pool).await
    }

    /// Full-text match of `name` against parish names.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Vec<Parish>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parishes
             WHERE to_tsvector('simple', parish_name) @@ plainto_tsquery('simple', $1)
             ORDER BY parish_name"
        );
        sqlx::query_as::<_, Parish>(&query)
            .bind(name)
            .fetch_all(pool)
            .await
    }

    /// Parishes in a deanery, matched case-insensitively.
    pub async fn list_by_deanery(
        pool: &PgPool,
        deanery: &str,
    ) -> Result<Vec<Parish>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM parishes
             WHERE LOWER(deanery) = LOWER(TRIM($1))
             ORDER BY parish_name"
        );
        sqlx::query_as::<_, Parish>(&query)
            .bind(deanery)
            .fetch_all(pool)
            .await
    }

    /// Update a parish. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateParish,
    ) -> Result<Option<Parish>, sqlx::Error> {
        let mut update = PartialUpdate::new("parishes", "id");
        input.apply(&mut update);
        if update.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        update.fetch_optional(pool, id, COLUMNS).await
    }

    /// Delete a parish by ID. Members keep their accounts with `parish_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parishes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
