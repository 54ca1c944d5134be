//! Marriage party (groom, bride, witness) model and DTOs.

use ccb_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::update::{Changeset, PartialUpdate};

/// A row from the `marriage_parties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarriageParty {
    pub id: DbId,
    pub marriage_id: DbId,
    /// One of `groom`, `bride`, `witness`.
    pub party_type: String,
    pub full_name: String,
    pub age: Option<i32>,
    pub marital_status: Option<String>,
    pub residence_address: Option<String>,
    pub residence_county: Option<String>,
    pub residence_sub_county: Option<String>,
    pub occupation: Option<String>,
    pub father_name: Option<String>,
    pub father_occupation: Option<String>,
    pub father_residence: Option<String>,
    pub mother_name: Option<String>,
    pub mother_occupation: Option<String>,
    pub mother_residence: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMarriageParty {
    pub marriage_id: DbId,
    pub party_type: String,
    pub full_name: String,
    pub age: Option<i32>,
    pub marital_status: Option<String>,
    pub residence_address: Option<String>,
    pub residence_county: Option<String>,
    pub residence_sub_county: Option<String>,
    pub occupation: Option<String>,
    pub father_name: Option<String>,
    pub father_occupation: Option<String>,
    pub father_residence: Option<String>,
    pub mother_name: Option<String>,
    pub mother_occupation: Option<String>,
    pub mother_residence: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMarriageParty {
    pub marriage_id: Option<DbId>,
    pub party_type: Option<String>,
    pub full_name: Option<String>,
    pub age: Option<i32>,
    pub marital_status: Option<String>,
    pub residence_address: Option<String>,
    pub residence_county: Option<String>,
    pub residence_sub_county: Option<String>,
    pub occupation: Option<String>,
    pub father_name: Option<String>,
    pub father_occupation: Option<String>,
    pub father_residence: Option<String>,
    pub mother_name: Option<String>,
    pub mother_occupation: Option<String>,
    pub mother_residence: Option<String>,
}

impl Changeset for UpdateMarriageParty {
    fn apply(&self, update: &mut PartialUpdate) {
        update
            .set("marriage_id", &self.marriage_id)
            .set("party_type", &self.party_type)
            .set("full_name", &self.full_name)
            .set("age", &self.age)
            .set("marital_status", &self.marital_status)
            .set("residence_address", &self.residence_address)
            .set("residence_county", &self.residence_county)
            .set("residence_sub_county", &self.residence_sub_county)
            .set("occupation", &self.occupation)
            .set("father_name", &self.father_name)
            .set("father_occupation", &self.father_occupation)
            .set("father_residence", &self.father_residence)
            .set("mother_name", &self.mother_name)
            .set("mother_occupation", &self.mother_occupation)
            .set("mother_residence", &self.mother_residence);
    }
}
