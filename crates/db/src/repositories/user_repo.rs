//! Repository for the `users` table.

use ccb_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User};
use crate::update::{Changeset, PartialUpdate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, middle_name, email, password_hash, role, \
                       phone_number, parish_id, father, mother, siblings, tribe, clan, \
                       birth_place, birth_date, subcounty, residence, email_verified, \
                       created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role, first_name, last_name, middle_name,
                                phone_number, parish_id, father, mother, siblings, tribe, clan,
                                birth_place, birth_date, subcounty, residence)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
             RETURNING {COLUMNS}"
        );
        let p = &input.profile;
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&p.first_name)
            .bind(&p.last_name)
            .bind(&p.middle_name)
            .bind(&p.phone_number)
            .bind(p.parish_id)
            .bind(&p.father)
            .bind(&p.mother)
            .bind(&p.siblings)
            .bind(&p.tribe)
            .bind(&p.clan)
            .bind(&p.birth_place)
            .bind(p.birth_date)
            .bind(&p.subcounty)
            .bind(&p.residence)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Total number of users.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Users whose first name, last name, or "first last" equals `name`,
    /// ignoring case and surrounding whitespace.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE LOWER(TRIM(first_name)) = LOWER(TRIM($1))
                OR LOWER(TRIM(last_name)) = LOWER(TRIM($1))
                OR LOWER(CONCAT_WS(' ', TRIM(first_name), TRIM(last_name))) = LOWER(TRIM($1))
             ORDER BY id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(name)
            .fetch_all(pool)
            .await
    }

    /// List the members of a parish.
    pub async fn list_by_parish(pool: &PgPool, parish_id: DbId) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE parish_id = $1 ORDER BY id");
        sqlx::query_as::<_, User>(&query)
            .bind(parish_id)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut update = PartialUpdate::new("users", "id");
        input.apply(&mut update);
        if update.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        update.fetch_optional(pool, id, COLUMNS).await
    }

    /// Mark a user's email address as verified. Returns `true` if a row was updated.
    pub async fn mark_email_verified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET email_verified = TRUE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user by ID. Their sacrament records go with them.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
