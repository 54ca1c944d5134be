//! Baptism record model and DTOs.

use ccb_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::update::{Changeset, PartialUpdate};

/// A row from the `baptisms` table. Each person has at most one.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Baptism {
    pub id: DbId,
    pub user_id: DbId,
    pub parish: Option<String>,
    pub baptism_date: Option<Date>,
    pub minister: Option<String>,
    pub sponsor: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a baptism.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBaptism {
    pub user_id: DbId,
    pub parish: Option<String>,
    pub baptism_date: Option<Date>,
    pub minister: Option<String>,
    pub sponsor: Option<String>,
}

/// DTO for updating a baptism record. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBaptism {
    pub user_id: Option<DbId>,
    pub parish: Option<String>,
    pub baptism_date: Option<Date>,
    pub minister: Option<String>,
    pub sponsor: Option<String>,
}

impl Changeset for UpdateBaptism {
    fn apply(&self, update: &mut PartialUpdate) {
        update
            .set("user_id", &self.user_id)
            .set("parish", &self.parish)
            .set("baptism_date", &self.baptism_date)
            .set("minister", &self.minister)
            .set("sponsor", &self.sponsor);
    }
}
