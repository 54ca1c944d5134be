//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Access, refresh and email-verification token signing and validation.
//! - [`cookies`] -- `Set-Cookie` formatting and `Cookie` header parsing for the token cookies.

pub mod cookies;
pub mod jwt;
pub mod password;
