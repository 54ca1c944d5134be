//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) implementing
//!   [`Changeset`](crate::update::Changeset) for partial updates

pub mod baptism;
pub mod confirmation;
pub mod eucharist;
pub mod marriage;
pub mod marriage_document;
pub mod marriage_party;
pub mod parish;
pub mod user;
