//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from the access-token
//!   cookie, or from a Bearer token for non-browser clients.
//! - [`rbac::RequireAdmin`] -- Requires [`Capability::ManageUsers`](ccb_core::roles::Capability).
//! - [`rbac::RequireParishManager`] -- Requires `ManageParishes`.
//! - [`rbac::RequireRegistrar`] -- Requires `RecordSacraments`.
//! - [`rbac::RequireRegisterViewer`] -- Requires `ViewRegisters`.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
