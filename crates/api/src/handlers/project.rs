//! Handlers for the `/projects` resource and its onboarding endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use showroom_core::error::CoreError;
use showroom_core::onboarding::{
    validate_assets_advance, validate_completion, OnboardingStep, SaveMode, StepPayload,
};
use showroom_core::slug::slugify;
use showroom_db::models::project::{CreateProject, Project};
use showroom_db::repositories::{AssetRepo, OrganizationRepo, ProjectRepo};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a project and verify ownership. Projects owned by someone else are
/// reported as not found so their existence is not leaked.
pub(crate) async fn load_owned(
    state: &AppState,
    auth: &AuthUser,
    id: Uuid,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.owner_id == auth.user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: id.to_string(),
        }))?;
    Ok(project)
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Project name is required".into(),
        )));
    }

    let slug = slugify(&input.name);

    // The project inherits the publisher's company name when one exists.
    let company_name = OrganizationRepo::find_by_owner(&state.pool, auth.user_id)
        .await?
        .map(|org| org.name);

    let project = ProjectRepo::create(
        &state.pool,
        auth.user_id,
        &slug,
        &input,
        company_name.as_deref(),
    )
    .await?;

    tracing::info!(project_id = %project.id, slug = %project.slug, "Project created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_owned(&state, &auth, id).await?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<showroom_db::models::project::UpdateProject>,
) -> AppResult<Json<DataResponse<Project>>> {
    load_owned(&state, &auth, id).await?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Storage objects go first; asset records follow via the cascading row
/// delete. A failed object delete is logged and skipped so an unreachable
/// bucket cannot make a project undeletable.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, id).await?;

    let assets = AssetRepo::list_by_project(&state.pool, id).await?;
    for asset in &assets {
        if let Err(e) = state.storage.delete(&asset.file_key).await {
            tracing::warn!(file_key = %asset.file_key, error = %e, "Failed to delete storage object");
        }
    }

    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(project_id = %id, asset_count = assets.len(), "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: id.to_string(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Onboarding
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/onboarding/step
///
/// Persist one wizard step's fields. Depending on `mode`:
/// - `advance` (default): validate required fields, move the step forward
/// - `skip`: persist as-is and move forward without validation
/// - `autosave`: persist as-is, never move
///
/// The step only moves when the saved step is the project's current furthest
/// step, which makes re-saving an earlier step (or replaying the same save)
/// idempotent with respect to progress.
pub async fn save_step(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_owned(&state, &auth, id).await?;

    let mode = match body.get("mode") {
        None | Some(serde_json::Value::Null) => SaveMode::default(),
        Some(value) => serde_json::from_value::<SaveMode>(value.clone())
            .map_err(|_| AppError::BadRequest("Unknown save mode".into()))?,
    };

    let mut payload: StepPayload = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid step payload: {e}")))?;
    payload.normalize();

    if mode == SaveMode::Advance {
        if payload.step() == OnboardingStep::Assets {
            let primary_count = AssetRepo::count_primary(&state.pool, id).await?;
            validate_assets_advance(primary_count)?;
        } else {
            payload.validate()?;
        }
    }

    let current = OnboardingStep::from_str_db(&project.onboarding_step)?;
    let advance_to = if mode != SaveMode::Autosave && payload.step() == current {
        // `review -> done` is reserved for the complete endpoint.
        match current {
            OnboardingStep::Review => None,
            _ => current.next(),
        }
    } else {
        None
    };

    let project = ProjectRepo::apply_step(&state.pool, id, &payload, advance_to)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: id.to_string(),
        }))?;

    Ok(Json(DataResponse { data: project }))
}

/// POST /api/v1/projects/{id}/onboarding/complete
///
/// The terminal `review -> done` transition. Requires the review step to be
/// reached and all compliance confirmations to hold on the stored record.
pub async fn complete_onboarding(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Project>>> {
    let project = load_owned(&state, &auth, id).await?;

    let current = OnboardingStep::from_str_db(&project.onboarding_step)?;
    validate_completion(
        current,
        project.legal_requirements_completed,
        project.privacy_policy_provided,
        project.terms_accepted,
        project.content_guidelines_accepted,
    )?;

    let project = ProjectRepo::complete_onboarding(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: id.to_string(),
        }))?;

    tracing::info!(project_id = %id, "Onboarding completed");
    Ok(Json(DataResponse { data: project }))
}
