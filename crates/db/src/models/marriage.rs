//! Marriage record model and DTOs.

use ccb_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::marriage_document::MarriageDocumentWithUrl;
use crate::models::marriage_party::MarriageParty;
use crate::update::{Changeset, PartialUpdate};

/// A row from the `marriages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Marriage {
    pub id: DbId,
    pub user_id: DbId,
    pub certificate_number: Option<String>,
    pub submission_location: Option<String>,
    pub submission_sub_county: Option<String>,
    pub submission_county: Option<String>,
    pub marriage_date: Option<Date>,
    pub marriage_entry_number: Option<String>,
    pub registrar_certification_number: Option<String>,
    pub special_license_number: Option<String>,
    pub conducted_by: Option<String>,
    pub private_parties_count: Option<i32>,
    pub private_parties_names: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A marriage together with its parties and documents.
#[derive(Debug, Clone, Serialize)]
pub struct MarriageWithDetails {
    #[serde(flatten)]
    pub marriage: Marriage,
    pub parties: Vec<MarriageParty>,
    pub documents: Vec<MarriageDocumentWithUrl>,
}

/// DTO for recording a marriage.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMarriage {
    pub user_id: DbId,
    pub certificate_number: Option<String>,
    pub submission_location: Option<String>,
    pub submission_sub_county: Option<String>,
    pub submission_county: Option<String>,
    pub marriage_date: Option<Date>,
    pub marriage_entry_number: Option<String>,
    pub registrar_certification_number: Option<String>,
    pub special_license_number: Option<String>,
    pub conducted_by: Option<String>,
    pub private_parties_count: Option<i32>,
    pub private_parties_names: Option<String>,
}

/// DTO for updating a marriage record. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMarriage {
    pub user_id: Option<DbId>,
    pub certificate_number: Option<String>,
    pub submission_location: Option<String>,
    pub submission_sub_county: Option<String>,
    pub submission_county: Option<String>,
    pub marriage_date: Option<Date>,
    pub marriage_entry_number: Option<String>,
    pub registrar_certification_number: Option<String>,
    pub special_license_number: Option<String>,
    pub conducted_by: Option<String>,
    pub private_parties_count: Option<i32>,
    pub private_parties_names: Option<String>,
}

impl Changeset for UpdateMarriage {
    fn apply(&self, update: &mut PartialUpdate) {
        update
            .set("user_id", &self.user_id)
            .set("certificate_number", &self.certificate_number)
            .set("submission_location", &self.submission_location)
            .set("submission_sub_county", &self.submission_sub_county)
            .set("submission_county", &self.submission_county)
            .set("marriage_date", &self.marriage_date)
            .set("marriage_entry_number", &self.marriage_entry_number)
            .set(
                "registrar_certification_number",
                &self.registrar_certification_number,
            )
            .set("special_license_number", &self.special_license_number)
            .set("conducted_by", &self.conducted_by)
            .set("private_parties_count", &self.private_parties_count)
            .set("private_parties_names", &self.private_parties_names);
    }
}
