//! Handler for the public game manifest.
//!
//! The manifest is what the engine loads to render a showroom entry: the
//! public project fields plus every asset resolved to a signed URL. Only
//! public, fully-onboarded projects resolve; everything else is a 404.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use futures::future::join_all;
use serde::Serialize;
use showroom_core::assets::AssetKind;
use showroom_core::error::CoreError;
use showroom_core::manifest::ManifestAssets;
use showroom_db::models::project::ShowroomGame;
use showroom_db::repositories::{AssetRepo, ProjectRepo};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::upload::sign_url;
use crate::response::DataResponse;
use crate::state::AppState;

/// A complete manifest document: the public game fields with the resolved
/// asset section.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(flatten)]
    pub game: ShowroomGame,
    pub assets: ManifestAssets,
}

/// GET /api/v1/manifest/{slug}
///
/// The engine-facing entry point; manifests are addressed by the project's
/// public slug.
pub async fn get_manifest_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let game = ProjectRepo::find_published_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: slug,
        }))?;
    build_manifest(&state, game).await
}

/// GET /api/v1/showroom/games/{id}/manifest
pub async fn get_manifest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let game = ProjectRepo::find_published_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: id.to_string(),
        }))?;
    build_manifest(&state, game).await
}

/// Resolve every asset of a published game into the manifest document.
///
/// Assets whose URL cannot be generated are skipped with a warning rather
/// than failing the whole manifest.
async fn build_manifest(state: &AppState, game: ShowroomGame) -> AppResult<impl IntoResponse> {
    let assets = AssetRepo::list_by_project(&state.pool, game.id).await?;

    let resolved = join_all(assets.into_iter().map(|asset| {
        let state = state.clone();
        async move {
            let signed_url = sign_url(&state, &asset.file_key).await;
            (asset, signed_url)
        }
    }))
    .await;

    let mut manifest_assets = ManifestAssets::default();
    for (asset, signed_url) in resolved {
        match signed_url {
            Some(url) => manifest_assets.push(
                AssetKind::from_tag(&asset.kind),
                &asset.mime_type,
                url,
                asset.duration_seconds,
            ),
            None => {
                tracing::warn!(asset_id = %asset.id, "Skipping manifest asset without URL");
            }
        }
    }

    let cache_control = format!("public, max-age={}", state.config.manifest_cache_secs);
    Ok((
        [(header::CACHE_CONTROL, cache_control)],
        Json(DataResponse {
            data: Manifest {
                game,
                assets: manifest_assets,
            },
        }),
    ))
}
