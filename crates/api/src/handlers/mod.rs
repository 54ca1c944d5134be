//! HTTP handlers, one module per resource.

pub mod auth;
pub mod baptisms;
pub mod confirmations;
pub mod eucharists;
pub mod marriage_documents;
pub mod marriage_parties;
pub mod marriages;
pub mod parishes;
pub mod users;

use ccb_db::update::Changeset;

use crate::error::{AppError, AppResult};

/// Reject an update payload that carries no updatable field.
pub(crate) fn require_changes(input: &impl Changeset) -> AppResult<()> {
    if input.has_changes() {
        Ok(())
    } else {
        Err(AppError::BadRequest("No fields to update".into()))
    }
}
