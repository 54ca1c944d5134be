//! Repository for the `baptisms` table.

use ccb_core::types::DbId;
use sqlx::PgPool;

use crate::models::baptism::{Baptism, CreateBaptism, UpdateBaptism};
use crate::update::{Changeset, PartialUpdate};

const COLUMNS: &str =
    "id, user_id, parish, baptism_date, minister, sponsor, created_at, updated_at";

/// Provides CRUD operations for baptism records.
pub struct BaptismRepo;

impl BaptismRepo {
    /// Insert a new baptism record, returning the created row.
    ///
    /// Fails with a unique violation on `uq_baptisms_user_id` if the person
    /// already has one.
    pub async fn create(pool: &PgPool, input: &CreateBaptism) -> Result<Baptism, sqlx::Error> {
        let query = format!(
            "INSERT INTO baptisms (user_id, parish, baptism_date, minister, sponsor)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Baptism>(&query)
            .bind(input.user_id)
            .bind(&input.parish)
            .bind(input.baptism_date)
            .bind(&input.minister)
            .bind(&input.sponsor)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Baptism>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM baptisms WHERE id = $1");
        sqlx::query_as::<_, Baptism>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Baptism>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM baptisms ORDER BY id");
        sqlx::query_as::<_, Baptism>(&query).fetch_all(pool).await
    }

    /// Baptism records for one person.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Baptism>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM baptisms WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Baptism>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a baptism record. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBaptism,
    ) -> Result<Option<Baptism>, sqlx::Error> {
        let mut update = PartialUpdate::new("baptisms", "id");
        input.apply(&mut update);
        if update.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        update.fetch_optional(pool, id, COLUMNS).await
    }

    /// Delete a baptism record by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM baptisms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
