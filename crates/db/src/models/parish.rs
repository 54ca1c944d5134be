//! Parish entity model and DTOs.

use ccb_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::update::{Changeset, PartialUpdate};

/// A parish row from the `parishes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Parish {
    pub id: DbId,
    pub parish_name: String,
    pub deanery: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new parish.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParish {
    pub parish_name: String,
    pub deanery: Option<String>,
}

/// DTO for updating an existing parish. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateParish {
    pub parish_name: Option<String>,
    pub deanery: Option<String>,
}

impl Changeset for UpdateParish {
    fn apply(&self, update: &mut PartialUpdate) {
        update
            .set("parish_name", &self.parish_name)
            .set("deanery", &self.deanery);
    }
}
