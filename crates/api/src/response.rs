//! Small response bodies shared by several handlers.
//!
//! Entity endpoints return rows as bare JSON; these cover the non-entity
//! replies.

use serde::Serialize;

/// `{ "user_count": n }` returned by `GET /users/count`.
#[derive(Debug, Serialize)]
pub struct UserCountResponse {
    pub user_count: i64,
}

/// `{ "message": "..." }` for actions without a resource to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
