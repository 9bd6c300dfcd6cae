//! Route definitions for the public `/showroom` surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::{manifest, showroom};
use crate::state::AppState;

/// Routes mounted at `/showroom`. All public, no authentication.
///
/// ```text
/// GET /games                    -> list
/// GET /games/search             -> search (?q=...)
/// GET /games/genre/{genre}      -> by_genre
/// GET /games/track/{track}      -> by_track
/// GET /games/{id}               -> get_by_id
/// GET /games/{id}/manifest      -> get_manifest
/// GET /featured                 -> featured
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/games", get(showroom::list))
        .route("/games/search", get(showroom::search))
        .route("/games/genre/{genre}", get(showroom::by_genre))
        .route("/games/track/{track}", get(showroom::by_track))
        .route("/games/{id}", get(showroom::get_by_id))
        .route("/games/{id}/manifest", get(manifest::get_manifest))
        .route("/featured", get(showroom::featured))
}
