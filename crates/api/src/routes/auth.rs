//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /magic-link   -> magic_link (public)
/// POST /verify       -> verify (public)
/// GET  /session      -> session (requires auth)
/// POST /logout       -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/magic-link", post(auth::magic_link))
        .route("/verify", post(auth::verify))
        .route("/session", get(auth::session))
        .route("/logout", post(auth::logout))
}
