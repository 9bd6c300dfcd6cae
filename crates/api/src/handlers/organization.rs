//! Handlers for the `/org` resource (one organization per account).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use showroom_core::error::CoreError;
use showroom_db::models::organization::{Organization, UpsertOrganization};
use showroom_db::repositories::OrganizationRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/org/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Organization>>> {
    let org = OrganizationRepo::find_by_owner(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: auth.user_id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: org }))
}

/// POST /api/v1/org
///
/// Creates the caller's organization, or replaces its profile if one
/// already exists.
pub async fn upsert(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpsertOrganization>,
) -> AppResult<(StatusCode, Json<DataResponse<Organization>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Organization name is required".into(),
        )));
    }

    let org = OrganizationRepo::upsert(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: org })))
}

/// PUT /api/v1/org/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpsertOrganization>,
) -> AppResult<Json<DataResponse<Organization>>> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Organization name is required".into(),
        )));
    }

    let org = OrganizationRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: org }))
}
