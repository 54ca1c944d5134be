//! Repository for the `confirmations` table.

use ccb_core::types::DbId;
use sqlx::PgPool;

use crate::models::confirmation::{Confirmation, CreateConfirmation, UpdateConfirmation};
use crate::update::{Changeset, PartialUpdate};

const COLUMNS: &str = "id, user_id, confirmation_place, confirmation_date, confirmation_no, \
                       minister, created_at, updated_at";

/// Provides CRUD operations for confirmation records.
pub struct ConfirmationRepo;

impl ConfirmationRepo {
    /// Insert a new confirmation record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateConfirmation,
    ) -> Result<Confirmation, sqlx::Error> {
        let query = format!(
            "INSERT INTO confirmations
                (user_id, confirmation_place, confirmation_date, confirmation_no, minister)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Confirmation>(&query)
            .bind(input.user_id)
            .bind(&input.confirmation_place)
            .bind(input.confirmation_date)
            .bind(&input.confirmation_no)
            .bind(&input.minister)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Confirmation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM confirmations WHERE id = $1");
        sqlx::query_as::<_, Confirmation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Confirmation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM confirmations ORDER BY id");
        sqlx::query_as::<_, Confirmation>(&query)
            .fetch_all(pool)
            .await
    }

    /// Confirmation records for one person, oldest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Confirmation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM confirmations
             WHERE user_id = $1
             ORDER BY confirmation_date NULLS LAST, id"
        );
        sqlx::query_as::<_, Confirmation>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a confirmation record. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateConfirmation,
    ) -> Result<Option<Confirmation>, sqlx::Error> {
        let mut update = PartialUpdate::new("confirmations", "id");
        input.apply(&mut update);
        if update.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        update.fetch_optional(pool, id, COLUMNS).await
    }

    /// Delete a confirmation record by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM confirmations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
