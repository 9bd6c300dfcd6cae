//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod asset_repo;
pub mod organization_repo;
pub mod project_repo;
pub mod session_repo;
pub mod user_repo;

pub use asset_repo::AssetRepo;
pub use organization_repo::OrganizationRepo;
pub use project_repo::ProjectRepo;
pub use session_repo::{LoginTokenRepo, SessionRepo};
pub use user_repo::UserRepo;
