//! Domain logic for the showroom publishing portal.
//!
//! Everything in this crate is pure: no I/O, no database, no HTTP. The api
//! and db crates call into these modules for validation, classification,
//! and the onboarding step machine.

pub mod assets;
pub mod error;
pub mod manifest;
pub mod onboarding;
pub mod slug;
pub mod types;
