//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod baptism_repo;
pub mod confirmation_repo;
pub mod eucharist_repo;
pub mod marriage_document_repo;
pub mod marriage_party_repo;
pub mod marriage_repo;
pub mod parish_repo;
pub mod user_repo;

pub use baptism_repo::BaptismRepo;
pub use confirmation_repo::ConfirmationRepo;
pub use eucharist_repo::EucharistRepo;
pub use marriage_document_repo::MarriageDocumentRepo;
pub use marriage_party_repo::MarriagePartyRepo;
pub use marriage_repo::MarriageRepo;
pub use parish_repo::ParishRepo;
pub use user_repo::UserRepo;
