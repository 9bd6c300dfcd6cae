//! Asset row model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use showroom_core::types::Timestamp;

/// A row from the `assets` table -- one per uploaded media file.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub project_id: Uuid,
    pub file_name: String,
    /// Opaque path into object storage.
    pub file_key: String,
    pub mime_type: String,
    pub file_size_bytes: i64,
    /// Canonical kind: `logo`, `cover_art`, `trailer`, or `screenshot`.
    pub kind: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub created_at: Timestamp,
}

/// Insert payload for a new asset record.
#[derive(Debug, Clone)]
pub struct CreateAsset {
    pub project_id: Uuid,
    pub file_name: String,
    pub file_key: String,
    pub mime_type: String,
    pub file_size_bytes: i64,
    pub kind: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_seconds: Option<i32>,
}

/// An asset with its time-limited signed URL attached.
///
/// `signed_url` is `None` when URL generation failed for that asset; the
/// read-aggregation paths degrade per-item instead of failing the request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAsset {
    #[serde(flatten)]
    pub asset: Asset,
    pub signed_url: Option<String>,
}
