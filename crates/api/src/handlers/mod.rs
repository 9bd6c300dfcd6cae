//! HTTP handlers, one module per resource.

pub mod auth;
pub mod manifest;
pub mod organization;
pub mod project;
pub mod showroom;
pub mod upload;
