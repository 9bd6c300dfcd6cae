//! Route definitions for the `/projects` resource.
//!
//! Also nests onboarding and asset routes under `/projects/{id}/...`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use showroom_core::assets::MAX_VIDEO_BYTES;

use crate::handlers::{project, upload};
use crate::state::AppState;

/// Routes mounted at `/projects`. All require authentication.
///
/// ```text
/// GET    /                           -> list
/// POST   /                           -> create
/// GET    /{id}                       -> get_by_id
/// PUT    /{id}                       -> update
/// DELETE /{id}                       -> delete
///
/// POST   /{id}/onboarding/step       -> save_step
/// POST   /{id}/onboarding/complete   -> complete_onboarding
///
/// GET    /{id}/assets                -> list
/// POST   /{id}/assets                -> upload
/// GET    /{id}/assets/signed         -> list_signed
/// DELETE /{id}/assets/{asset_id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/onboarding/step", post(project::save_step))
        .route(
            "/{id}/onboarding/complete",
            post(project::complete_onboarding),
        )
        .route("/{id}/assets", get(upload::list).post(upload::upload))
        .route("/{id}/assets/signed", get(upload::list_signed))
        .route(
            "/{id}/assets/{asset_id}",
            axum::routing::delete(upload::delete),
        )
        // Uploads can exceed axum's 2 MB default body limit; per-kind size
        // ceilings are enforced in the upload handler.
        .layer(DefaultBodyLimit::max(MAX_VIDEO_BYTES as usize + 1024 * 1024))
}
