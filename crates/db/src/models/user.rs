//! User entity model and DTOs.

use ccb_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::update::{Changeset, PartialUpdate};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone_number: Option<String>,
    pub parish_id: Option<DbId>,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub siblings: Option<String>,
    pub tribe: Option<String>,
    pub clan: Option<String>,
    pub birth_place: Option<String>,
    pub birth_date: Option<Date>,
    pub subcounty: Option<String>,
    pub residence: Option<String>,
    pub email_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub email: String,
    pub role: String,
    pub phone_number: Option<String>,
    pub parish_id: Option<DbId>,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub siblings: Option<String>,
    pub tribe: Option<String>,
    pub clan: Option<String>,
    pub birth_place: Option<String>,
    pub birth_date: Option<Date>,
    pub subcounty: Option<String>,
    pub residence: Option<String>,
    pub email_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            middle_name: user.middle_name,
            email: user.email,
            role: user.role,
            phone_number: user.phone_number,
            parish_id: user.parish_id,
            father: user.father,
            mother: user.mother,
            siblings: user.siblings,
            tribe: user.tribe,
            clan: user.clan,
            birth_place: user.birth_place,
            birth_date: user.birth_date,
            subcounty: user.subcounty,
            residence: user.residence,
            email_verified: user.email_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Personal details shared by the create and register payloads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub phone_number: Option<String>,
    pub parish_id: Option<DbId>,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub siblings: Option<String>,
    pub tribe: Option<String>,
    pub clan: Option<String>,
    pub birth_place: Option<String>,
    pub birth_date: Option<Date>,
    pub subcounty: Option<String>,
    pub residence: Option<String>,
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub profile: UserProfile,
}

/// DTO for updating an existing user. All fields are optional.
///
/// `password_hash` is filled by the handler after hashing a new password;
/// it is never read from a request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub phone_number: Option<String>,
    pub parish_id: Option<DbId>,
    pub father: Option<String>,
    pub mother: Option<String>,
    pub siblings: Option<String>,
    pub tribe: Option<String>,
    pub clan: Option<String>,
    pub birth_place: Option<String>,
    pub birth_date: Option<Date>,
    pub subcounty: Option<String>,
    pub residence: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
}

impl Changeset for UpdateUser {
    fn apply(&self, update: &mut PartialUpdate) {
        update
            .set("first_name", &self.first_name)
            .set("last_name", &self.last_name)
            .set("middle_name", &self.middle_name)
            .set("email", &self.email)
            .set("role", &self.role)
            .set("phone_number", &self.phone_number)
            .set("parish_id", &self.parish_id)
            .set("father", &self.father)
            .set("mother", &self.mother)
            .set("siblings", &self.siblings)
            .set("tribe", &self.tribe)
            .set("clan", &self.clan)
            .set("birth_place", &self.birth_place)
            .set("birth_date", &self.birth_date)
            .set("subcounty", &self.subcounty)
            .set("residence", &self.residence)
            .set("password_hash", &self.password_hash);
    }
}
