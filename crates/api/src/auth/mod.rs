//! Magic-link authentication: one-time tokens, JWT sessions, mail delivery.

pub mod jwt;
pub mod mail;
pub mod token;
