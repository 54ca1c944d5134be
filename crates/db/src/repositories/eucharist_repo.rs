//! Repository for the `eucharists` table.

use ccb_core::types::DbId;
use sqlx::PgPool;

use crate::models::eucharist::{CreateEucharist, Eucharist, UpdateEucharist};
use crate::update::{Changeset, PartialUpdate};

const COLUMNS: &str = "id, user_id, eucharist_place, eucharist_date, created_at, updated_at";

/// Provides CRUD operations for first eucharist records.
pub struct EucharistRepo;

impl EucharistRepo {
    pub async fn create(pool: &PgPool, input: &CreateEucharist) -> Result<Eucharist, sqlx::Error> {
        let query = format!(
            "INSERT INTO eucharists (user_id, eucharist_place, eucharist_date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Eucharist>(&query)
            .bind(input.user_id)
            .bind(&input.eucharist_place)
            .bind(input.eucharist_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Eucharist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM eucharists WHERE id = $1");
        sqlx::query_as::<_, Eucharist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Eucharist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM eucharists ORDER BY id");
        sqlx::query_as::<_, Eucharist>(&query).fetch_all(pool).await
    }

    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Eucharist>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM eucharists
             WHERE user_id = $1
             ORDER BY eucharist_date NULLS LAST, id"
        );
        sqlx::query_as::<_, Eucharist>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a eucharist record. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEucharist,
    ) -> Result<Option<Eucharist>, sqlx::Error> {
        let mut update = PartialUpdate::new("eucharists", "id");
        input.apply(&mut update);
        if update.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        update.fetch_optional(pool, id, COLUMNS).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM eucharists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
