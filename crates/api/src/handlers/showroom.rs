//! Handlers for the public showroom catalog.
//!
//! Every query here is restricted to public, fully-onboarded projects. No
//! authentication: this is the surface the game client browses.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use showroom_core::error::CoreError;
use showroom_db::models::project::ShowroomGame;
use showroom_db::repositories::ProjectRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/showroom/games
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ShowroomGame>>>> {
    let games = ProjectRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: games }))
}

/// GET /api/v1/showroom/games/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<ShowroomGame>>> {
    let game = ProjectRepo::find_published_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: game }))
}

/// GET /api/v1/showroom/games/genre/{genre}
pub async fn by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> AppResult<Json<DataResponse<Vec<ShowroomGame>>>> {
    let games = ProjectRepo::list_published_by_genre(&state.pool, &genre).await?;
    Ok(Json(DataResponse { data: games }))
}

/// GET /api/v1/showroom/games/track/{track}
pub async fn by_track(
    State(state): State<AppState>,
    Path(track): Path<String>,
) -> AppResult<Json<DataResponse<Vec<ShowroomGame>>>> {
    let games = ProjectRepo::list_published_by_track(&state.pool, &track).await?;
    Ok(Json(DataResponse { data: games }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// GET /api/v1/showroom/games/search?q=...
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Vec<ShowroomGame>>>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(AppError::BadRequest("Search query must not be empty".into()));
    }
    let games = ProjectRepo::search_published(&state.pool, query).await?;
    Ok(Json(DataResponse { data: games }))
}

/// GET /api/v1/showroom/featured
pub async fn featured(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ShowroomGame>>>> {
    let games = ProjectRepo::list_featured(&state.pool).await?;
    Ok(Json(DataResponse { data: games }))
}
