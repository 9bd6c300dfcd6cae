pub mod auth;
pub mod health;
pub mod organization;
pub mod projects;
pub mod showroom;

use axum::routing::get;
use axum::Router;

use crate::handlers::manifest;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/magic-link                          request sign-in link (public)
/// /auth/verify                              exchange token for JWT (public)
/// /auth/session                             current account (requires auth)
/// /auth/logout                              revoke sessions (requires auth)
///
/// /projects                                 list, create
/// /projects/{id}                            get, update, delete
/// /projects/{id}/onboarding/step            save wizard step (POST)
/// /projects/{id}/onboarding/complete        finish onboarding (POST)
/// /projects/{id}/assets                     list, upload
/// /projects/{id}/assets/signed              list with signed URLs
/// /projects/{id}/assets/{asset_id}          delete
///
/// /org                                      upsert (POST)
/// /org/me                                   current organization (GET)
/// /org/{id}                                 update (PUT)
///
/// /showroom/games                           public catalog (GET)
/// /showroom/games/search                    text search (GET)
/// /showroom/games/genre/{genre}             filter by genre (GET)
/// /showroom/games/track/{track}             filter by publishing track (GET)
/// /showroom/games/{id}                      one public game (GET)
/// /showroom/games/{id}/manifest             engine manifest, by id (GET)
/// /showroom/featured                        featured rail (GET)
///
/// /manifest/{slug}                          engine manifest, by slug (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", projects::router())
        .nest("/org", organization::router())
        .nest("/showroom", showroom::router())
        .route("/manifest/{slug}", get(manifest::get_manifest_by_slug))
}
