//! Handlers for the media upload pipeline under `/projects/{id}/assets`.
//!
//! An upload is validated before any byte leaves the process: ownership,
//! then MIME allow-list and the per-kind size ceilings. Only after the file
//! has landed in object storage is the asset record written, and only then
//! is the project's primary-asset pointer patched. A pointer patch failing
//! after the record exists is logged and tolerated; the record is the source
//! of truth and the pointer can be repaired by the next upload.

use std::io::Cursor;
use std::time::Duration;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use futures::future::join_all;
use serde::Serialize;
use showroom_core::assets::{validate_upload, AssetKind};
use showroom_core::error::CoreError;
use showroom_db::models::asset::{Asset, CreateAsset, SignedAsset};
use showroom_db::repositories::{AssetRepo, ProjectRepo};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::handlers::project::load_owned;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upload response: the stored record plus both URL forms.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(flatten)]
    pub asset: Asset,
    /// Time-limited read URL. `None` when presigning failed; the upload
    /// itself still succeeded.
    pub signed_url: Option<String>,
    /// Stable public URL, when the storage backend exposes one.
    pub public_url: Option<String>,
}

/// POST /api/v1/projects/{id}/assets
///
/// Multipart body with a `file` part, an optional `kind` text part, and
/// optional declared `width` / `height` / `duration` text parts. Unknown
/// kind tags are stored as screenshots.
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<UploadResponse>>)> {
    load_owned(&state, &auth, id).await?;

    let mut kind_tag: Option<String> = None;
    let mut declared_width: Option<i32> = None;
    let mut declared_height: Option<i32> = None;
    let mut declared_duration: Option<i32> = None;
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "kind" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid 'kind' field: {e}")))?;
                kind_tag = Some(text);
            }
            "width" => declared_width = Some(parse_metadata_field(&name, field).await?),
            "height" => declared_height = Some(parse_metadata_field(&name, field).await?),
            "duration" => declared_duration = Some(parse_metadata_field(&name, field).await?),
            "file" => {
                let file_name = field
                    .file_name()
                    .unwrap_or("upload")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, mime_type, bytes) = file.ok_or_else(|| {
        AppError::BadRequest("Multipart body must contain a 'file' part".into())
    })?;

    let kind = AssetKind::from_tag(kind_tag.as_deref().unwrap_or("screenshot"));
    validate_upload(&mime_type, bytes.len() as u64, kind)?;

    // Declared dimensions win; for images the header is the fallback. A file
    // whose header cannot be parsed still uploads, just without dimensions.
    let (width, height) = match (declared_width, declared_height) {
        (Some(w), Some(h)) => (Some(w), Some(h)),
        _ if mime_type.starts_with("image/") => match image_dimensions(&bytes) {
            Some((w, h)) => (
                declared_width.or(Some(w as i32)),
                declared_height.or(Some(h as i32)),
            ),
            None => {
                tracing::warn!(%file_name, "Could not read image dimensions");
                (declared_width, declared_height)
            }
        },
        _ => (declared_width, declared_height),
    };

    let file_key = format!(
        "projects/{id}/{}/{}.{}",
        kind.as_str(),
        Uuid::new_v4(),
        file_extension(&file_name, &mime_type)
    );

    state.storage.put(&file_key, bytes.clone(), &mime_type).await?;

    let asset = AssetRepo::create(
        &state.pool,
        &CreateAsset {
            project_id: id,
            file_name,
            file_key: file_key.clone(),
            mime_type: mime_type.clone(),
            file_size_bytes: bytes.len() as i64,
            kind: kind.as_str().to_string(),
            width,
            height,
            duration_seconds: declared_duration,
        },
    )
    .await?;

    // Keep the project's asset pointers in sync, best-effort.
    let patch_result = match kind.project_field() {
        Some(field) => ProjectRepo::patch_primary_asset_key(&state.pool, id, field, &file_key).await,
        None => ProjectRepo::append_screenshot_key(&state.pool, id, &file_key).await,
    };
    if let Err(e) = patch_result {
        tracing::warn!(project_id = %id, %file_key, error = %e, "Failed to patch asset pointer");
    }

    let signed_url = sign_url(&state, &file_key).await;
    let public_url = state.storage.public_url(&file_key);

    tracing::info!(project_id = %id, asset_id = %asset.id, kind = %asset.kind, "Asset uploaded");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadResponse {
                asset,
                signed_url,
                public_url,
            },
        }),
    ))
}

/// GET /api/v1/projects/{id}/assets
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Vec<Asset>>>> {
    load_owned(&state, &auth, id).await?;
    let assets = AssetRepo::list_by_project(&state.pool, id).await?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/projects/{id}/assets/signed
///
/// Assets with signed URLs attached. URL generation degrades per-asset.
pub async fn list_signed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Vec<SignedAsset>>>> {
    load_owned(&state, &auth, id).await?;
    let assets = AssetRepo::list_by_project(&state.pool, id).await?;

    let signed = join_all(assets.into_iter().map(|asset| {
        let state = state.clone();
        async move {
            let signed_url = sign_url(&state, &asset.file_key).await;
            SignedAsset { asset, signed_url }
        }
    }))
    .await;

    Ok(Json(DataResponse { data: signed }))
}

/// DELETE /api/v1/projects/{id}/assets/{asset_id}
///
/// The storage object is removed first; the record only goes once the bytes
/// are gone, so a failed storage delete leaves the record for a retry.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, asset_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    load_owned(&state, &auth, id).await?;

    let asset = AssetRepo::find_by_id(&state.pool, id, asset_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: asset_id.to_string(),
        }))?;

    state.storage.delete(&asset.file_key).await?;

    let kind = AssetKind::from_tag(&asset.kind);
    let unpatch_result = match kind.project_field() {
        Some(field) => {
            ProjectRepo::clear_primary_asset_key(&state.pool, id, field, &asset.file_key).await
        }
        None => ProjectRepo::remove_screenshot_key(&state.pool, id, &asset.file_key).await,
    };
    if let Err(e) = unpatch_result {
        tracing::warn!(project_id = %id, file_key = %asset.file_key, error = %e, "Failed to clear asset pointer");
    }

    let removed = AssetRepo::delete(&state.pool, id, asset_id).await?;
    if removed.is_none() {
        // A concurrent delete got there first; the object is gone either way.
        tracing::debug!(asset_id = %asset_id, "Asset record already removed");
    }
    tracing::info!(project_id = %id, asset_id = %asset_id, "Asset deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Presign a read URL, degrading to `None` with a warning on failure.
pub(crate) async fn sign_url(state: &AppState, file_key: &str) -> Option<String> {
    let ttl = Duration::from_secs(state.config.asset_url_ttl_secs);
    match state.storage.presigned_url(file_key, ttl).await {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(%file_key, error = %e, "Failed to presign asset URL");
            None
        }
    }
}

/// Parse a declared numeric metadata part (`width`, `height`, `duration`).
async fn parse_metadata_field(
    name: &str,
    field: axum::extract::multipart::Field<'_>,
) -> AppResult<i32> {
    let text = field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid '{name}' field: {e}")))?;
    text.trim()
        .parse::<i32>()
        .ok()
        .filter(|v| *v >= 0)
        .ok_or_else(|| {
            AppError::BadRequest(format!("'{name}' must be a non-negative integer"))
        })
}

/// Read image dimensions from the file header without decoding pixels.
fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Pick a storage-key extension from the upload's file name, falling back to
/// the MIME subtype.
fn file_extension(file_name: &str, mime_type: &str) -> String {
    let from_name = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    from_name.unwrap_or_else(|| match mime_type {
        "image/jpeg" => "jpg".to_string(),
        "video/quicktime" => "mov".to_string(),
        other => other
            .rsplit('/')
            .next()
            .unwrap_or("bin")
            .to_string(),
    })
}
