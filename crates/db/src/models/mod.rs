//! Row models and DTOs.
//!
//! Columns are snake_case; every serializable type renames to camelCase so
//! storage naming never leaks onto the wire. This module is the single place
//! that casing translation happens.

pub mod asset;
pub mod organization;
pub mod project;
pub mod session;
pub mod user;
