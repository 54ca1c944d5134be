//! First eucharist record model and DTOs.

use ccb_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::update::{Changeset, PartialUpdate};

/// A row from the `eucharists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Eucharist {
    pub id: DbId,
    pub user_id: DbId,
    pub eucharist_place: Option<String>,
    pub eucharist_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEucharist {
    pub user_id: DbId,
    pub eucharist_place: Option<String>,
    pub eucharist_date: Option<Date>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEucharist {
    pub user_id: Option<DbId>,
    pub eucharist_place: Option<String>,
    pub eucharist_date: Option<Date>,
}

impl Changeset for UpdateEucharist {
    fn apply(&self, update: &mut PartialUpdate) {
        update
            .set("user_id", &self.user_id)
            .set("eucharist_place", &self.eucharist_place)
            .set("eucharist_date", &self.eucharist_date);
    }
}
