//! Domain types and rules shared by the CCB-Sys database and API crates.
//!
//! Nothing in this crate performs I/O.

pub mod documents;
pub mod error;
pub mod marriage;
pub mod roles;
pub mod types;
