//! Confirmation record model and DTOs.

use ccb_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::update::{Changeset, PartialUpdate};

/// A row from the `confirmations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Confirmation {
    pub id: DbId,
    pub user_id: DbId,
    pub confirmation_place: Option<String>,
    pub confirmation_date: Option<Date>,
    pub confirmation_no: Option<String>,
    pub minister: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConfirmation {
    pub user_id: DbId,
    pub confirmation_place: Option<String>,
    pub confirmation_date: Option<Date>,
    pub confirmation_no: Option<String>,
    pub minister: Option<String>,
}

/// DTO for updating a confirmation record. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateConfirmation {
    pub user_id: Option<DbId>,
    pub confirmation_place: Option<String>,
    pub confirmation_date: Option<Date>,
    pub confirmation_no: Option<String>,
    pub minister: Option<String>,
}

impl Changeset for UpdateConfirmation {
    fn apply(&self, update: &mut PartialUpdate) {
        update
            .set("user_id", &self.user_id)
            .set("confirmation_place", &self.confirmation_place)
            .set("confirmation_date", &self.confirmation_date)
            .set("confirmation_no", &self.confirmation_no)
            .set("minister", &self.minister);
    }
}
