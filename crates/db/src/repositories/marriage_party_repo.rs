//! Repository for the `marriage_parties` table.

use ccb_core::types::DbId;
use sqlx::PgPool;

use crate::models::marriage_party::{CreateMarriageParty, MarriageParty, UpdateMarriageParty};
use crate::update::{Changeset, PartialUpdate};

const COLUMNS: &str = "id, marriage_id, party_type, full_name, age, marital_status, \
                       residence_address, residence_county, residence_sub_county, occupation, \
                       father_name, father_occupation, father_residence, mother_name, \
                       mother_occupation, mother_residence, created_at, updated_at";

/// Groom first, then bride, then witnesses.
const PARTY_ORDER: &str = "CASE party_type WHEN 'groom' THEN 0 WHEN 'bride' THEN 1 ELSE 2 END";

/// Provides CRUD operations for marriage parties.
pub struct MarriagePartyRepo;

impl MarriagePartyRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateMarriageParty,
    ) -> Result<MarriageParty, sqlx::Error> {
        let query = format!(
            "INSERT INTO marriage_parties
                (marriage_id, party_type, full_name, age, marital_status, residence_address,
                 residence_county, residence_sub_county, occupation, father_name,
                 father_occupation, father_residence, mother_name, mother_occupation,
                 mother_residence)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarriageParty>(&query)
            .bind(input.marriage_id)
            .bind(&input.party_type)
            .bind(&input.full_name)
            .bind(input.age)
            .bind(&input.marital_status)
            .bind(&input.residence_address)
            .bind(&input.residence_county)
            .bind(&input.residence_sub_county)
            .bind(&input.occupation)
            .bind(&input.father_name)
            .bind(&input.father_occupation)
            .bind(&input.father_residence)
            .bind(&input.mother_name)
            .bind(&input.mother_occupation)
            .bind(&input.mother_residence)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarriageParty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marriage_parties WHERE id = $1");
        sqlx::query_as::<_, MarriageParty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<MarriageParty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marriage_parties ORDER BY id");
        sqlx::query_as::<_, MarriageParty>(&query)
            .fetch_all(pool)
            .await
    }

    /// Parties of one marriage.
    pub async fn list_by_marriage(
        pool: &PgPool,
        marriage_id: DbId,
    ) -> Result<Vec<MarriageParty>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marriage_parties
             WHERE marriage_id = $1
             ORDER BY {PARTY_ORDER}, id"
        );
        sqlx::query_as::<_, MarriageParty>(&query)
            .bind(marriage_id)
            .fetch_all(pool)
            .await
    }

    /// Parties of several marriages at once.
    pub async fn list_by_marriages(
        pool: &PgPool,
        marriage_ids: &[DbId],
    ) -> Result<Vec<MarriageParty>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marriage_parties
             WHERE marriage_id = ANY($1)
             ORDER BY marriage_id, {PARTY_ORDER}, id"
        );
        sqlx::query_as::<_, MarriageParty>(&query)
            .bind(marriage_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a party. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMarriageParty,
    ) -> Result<Option<MarriageParty>, sqlx::Error> {
        let mut update = PartialUpdate::new("marriage_parties", "id");
        input.apply(&mut update);
        if update.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        update.fetch_optional(pool, id, COLUMNS).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM marriage_parties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
