//! Repository for the `assets` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::asset::{Asset, CreateAsset};

const ASSET_COLUMNS: &str = "\
    id, project_id, file_name, file_key, mime_type, file_size_bytes, \
    kind, width, height, duration_seconds, created_at";

/// Provides CRUD operations for uploaded media records.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset record after the file has landed in storage.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets \
                (project_id, file_name, file_key, mime_type, file_size_bytes, \
                 kind, width, height, duration_seconds) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(input.project_id)
            .bind(&input.file_name)
            .bind(&input.file_key)
            .bind(&input.mime_type)
            .bind(input.file_size_bytes)
            .bind(&input.kind)
            .bind(input.width)
            .bind(input.height)
            .bind(input.duration_seconds)
            .fetch_one(pool)
            .await
    }

    /// All assets for a project, oldest first so screenshots keep their
    /// upload order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM assets \
             WHERE project_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Find an asset by id, scoped to its project so callers cannot reach
    /// across project boundaries.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: Uuid,
        asset_id: Uuid,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM assets \
             WHERE id = $1 AND project_id = $2"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(asset_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an asset record, returning the deleted row so the caller can
    /// clean up the storage object.
    pub async fn delete(
        pool: &PgPool,
        project_id: Uuid,
        asset_id: Uuid,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "DELETE FROM assets WHERE id = $1 AND project_id = $2 \
             RETURNING {ASSET_COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(asset_id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// Count the primary assets (logo, cover art, trailer) on a project.
    /// The assets onboarding step requires at least one before advancing.
    pub async fn count_primary(pool: &PgPool, project_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM assets \
             WHERE project_id = $1 AND kind IN ('logo', 'cover_art', 'trailer')",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
