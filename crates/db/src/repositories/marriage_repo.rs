//! Repository for the `marriages` table.

use std::collections::HashMap;

use ccb_core::types::DbId;
use sqlx::PgPool;

use crate::models::marriage::{CreateMarriage, Marriage, MarriageWithDetails, UpdateMarriage};
use crate::models::marriage_document::MarriageDocumentWithUrl;
use crate::models::marriage_party::MarriageParty;
use crate::repositories::{MarriageDocumentRepo, MarriagePartyRepo};
use crate::update::{Changeset, PartialUpdate};

const COLUMNS: &str = "id, user_id, certificate_number, submission_location, \
                       submission_sub_county, submission_county, marriage_date, \
                       marriage_entry_number, registrar_certification_number, \
                       special_license_number, conducted_by, private_parties_count, \
                       private_parties_names, created_at, updated_at";

/// Provides CRUD operations for marriage records.
pub struct MarriageRepo;

impl MarriageRepo {
    /// Insert a new marriage record, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMarriage) -> Result<Marriage, sqlx::Error> {
        let query = format!(
            "INSERT INTO marriages
                (user_id, certificate_number, submission_location, submission_sub_county,
                 submission_county, marriage_date, marriage_entry_number,
                 registrar_certification_number, special_license_number, conducted_by,
                 private_parties_count, private_parties_names)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Marriage>(&query)
            .bind(input.user_id)
            .bind(&input.certificate_number)
            .bind(&input.submission_location)
            .bind(&input.submission_sub_county)
            .bind(&input.submission_county)
            .bind(input.marriage_date)
            .bind(&input.marriage_entry_number)
            .bind(&input.registrar_certification_number)
            .bind(&input.special_license_number)
            .bind(&input.conducted_by)
            .bind(input.private_parties_count)
            .bind(&input.private_parties_names)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Marriage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marriages WHERE id = $1");
        sqlx::query_as::<_, Marriage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a marriage with this ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM marriages WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Marriage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM marriages ORDER BY id");
        sqlx::query_as::<_, Marriage>(&query).fetch_all(pool).await
    }

    /// Marriage records for one person, most recent marriage first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Marriage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marriages
             WHERE user_id = $1
             ORDER BY marriage_date DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, Marriage>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Marriage records for one person, each with its parties and documents.
    ///
    /// Runs one query per table and groups the children by `marriage_id`.
    pub async fn list_with_details_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<MarriageWithDetails>, sqlx::Error> {
        let marriages = Self::list_by_user(pool, user_id).await?;
        if marriages.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = marriages.iter().map(|m| m.id).collect();
        let parties = MarriagePartyRepo::list_by_marriages(pool, &ids).await?;
        let documents = MarriageDocumentRepo::list_by_marriages(pool, &ids).await?;

        let mut parties_by_marriage: HashMap<DbId, Vec<MarriageParty>> = HashMap::new();
        for party in parties {
            parties_by_marriage
                .entry(party.marriage_id)
                .or_default()
                .push(party);
        }
        let mut documents_by_marriage: HashMap<DbId, Vec<MarriageDocumentWithUrl>> =
            HashMap::new();
        for document in documents {
            documents_by_marriage
                .entry(document.marriage_id)
                .or_default()
                .push(document.into());
        }

        Ok(marriages
            .into_iter()
            .map(|marriage| MarriageWithDetails {
                parties: parties_by_marriage.remove(&marriage.id).unwrap_or_default(),
                documents: documents_by_marriage
                    .remove(&marriage.id)
                    .unwrap_or_default(),
                marriage,
            })
            .collect())
    }

    /// Update a marriage record. Only present fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMarriage,
    ) -> Result<Option<Marriage>, sqlx::Error> {
        let mut update = PartialUpdate::new("marriages", "id");
        input.apply(&mut update);
        if update.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        update.fetch_optional(pool, id, COLUMNS).await
    }

    /// Delete a marriage record. Parties and document rows cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM marriages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
