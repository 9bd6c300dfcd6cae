//! Route definitions for the `/org` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::organization;
use crate::state::AppState;

/// Routes mounted at `/org`. All require authentication.
///
/// ```text
/// POST /        -> upsert
/// GET  /me      -> me
/// PUT  /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(organization::upsert))
        .route("/me", get(organization::me))
        .route("/{id}", put(organization::update))
}
