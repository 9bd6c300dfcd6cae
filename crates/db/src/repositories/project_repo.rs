//! Repository for the `projects` table.
//!
//! All mutation paths are field-level partial updates: the project record is
//! shared between the onboarding flow and the upload pipeline, so a
//! full-record overwrite would silently discard fields written by the other
//! flow. Every update here names only the columns it owns.

use sqlx::PgPool;
use uuid::Uuid;

use showroom_core::assets::PrimaryAssetField;
use showroom_core::onboarding::{OnboardingStep, StepPayload};

use crate::models::project::{CreateProject, Project, ShowroomGame, UpdateProject};

/// Column list for `projects` queries.
const PROJECT_COLUMNS: &str = "\
    id, slug, name, owner_id, \
    company_name, primary_contact_name, primary_contact_email, \
    primary_contact_phone, company_website, company_socials, \
    short_description, full_description, genre, publishing_track, \
    platform_type, distribution_method, target_platforms, game_url, build_status, \
    pass_sso_integration_status, readyverse_sdk_integration_status, \
    requires_launcher, launcher_url, build_format, integration_notes, \
    age_rating, rating_board, legal_requirements_completed, \
    privacy_policy_provided, terms_accepted, content_guidelines_accepted, \
    distribution_rights_confirmed, support_email, \
    game_logo_key, cover_art_key, trailer_key, screenshots_keys, \
    onboarding_step, onboarding_completed_at, \
    submission_status, intake_submitted_at, technical_integration_submitted_at, \
    compliance_review_submitted_at, game_submission_submitted_at, approved_at, \
    rejection_reason, review_notes, \
    is_public, created_at, updated_at";

/// Column list for public showroom queries.
const SHOWROOM_COLUMNS: &str = "\
    id, slug, name, company_name, short_description, full_description, \
    genre, publishing_track, platform_type, build_status, game_url, \
    onboarding_completed_at, updated_at";

/// Filter shared by every showroom query: public and fully onboarded.
const PUBLISHED_FILTER: &str = "is_public = TRUE AND onboarding_step = 'done'";

/// Number of projects returned by the featured query.
const FEATURED_LIMIT: i64 = 10;

/// A single bindable value for dynamically-built UPDATE statements.
enum Bind {
    Text(String),
    Bool(bool),
    Json(serde_json::Value),
}

/// Accumulates `SET` clauses and their bind values, keeping clause text and
/// bind order in lockstep.
struct UpdateBuilder {
    sets: Vec<String>,
    binds: Vec<Bind>,
}

impl UpdateBuilder {
    fn new() -> Self {
        Self {
            sets: Vec::new(),
            binds: Vec::new(),
        }
    }

    fn push(&mut self, column: &str, value: Bind) {
        // $1 is reserved for the row id in the final statement.
        let idx = self.binds.len() + 2;
        self.sets.push(format!("{column} = ${idx}"));
        self.binds.push(value);
    }

    fn push_text(&mut self, column: &str, value: &Option<String>) {
        if let Some(v) = value {
            self.push(column, Bind::Text(v.clone()));
        }
    }

    fn push_bool(&mut self, column: &str, value: Option<bool>) {
        if let Some(v) = value {
            self.push(column, Bind::Bool(v));
        }
    }

    /// Execute `UPDATE projects SET ... WHERE id = $1 RETURNING ...`.
    async fn execute(
        mut self,
        pool: &PgPool,
        id: Uuid,
        extra_sets: &[&str],
    ) -> Result<Option<Project>, sqlx::Error> {
        self.sets.extend(extra_sets.iter().map(|s| s.to_string()));
        self.sets.push("updated_at = now()".to_string());

        let query = format!(
            "UPDATE projects SET {} WHERE id = $1 RETURNING {PROJECT_COLUMNS}",
            self.sets.join(", ")
        );

        let mut q = sqlx::query_as::<_, Project>(&query).bind(id);
        for bind in self.binds {
            q = match bind {
                Bind::Text(v) => q.bind(v),
                Bind::Bool(v) => q.bind(v),
                Bind::Json(v) => q.bind(v),
            };
        }
        q.fetch_optional(pool).await
    }
}

/// Provides CRUD and workflow operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Create a project with server-generated slug and default workflow state.
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        slug: &str,
        input: &CreateProject,
        company_name: Option<&str>,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (owner_id, slug, name, company_name, short_description, genre) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .bind(slug)
            .bind(&input.name)
            .bind(company_name)
            .bind(input.short_description.as_deref())
            .bind(input.genre.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a project by id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects owned by a principal, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects \
             WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Partially update owner-editable fields. Absent fields are untouched.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut builder = UpdateBuilder::new();
        builder.push_text("name", &input.name);
        builder.push_text("company_name", &input.company_name);
        builder.push_text("primary_contact_name", &input.primary_contact_name);
        builder.push_text("primary_contact_email", &input.primary_contact_email);
        builder.push_text("primary_contact_phone", &input.primary_contact_phone);
        builder.push_text("company_website", &input.company_website);
        builder.push_text("company_socials", &input.company_socials);
        builder.push_text("short_description", &input.short_description);
        builder.push_text("full_description", &input.full_description);
        builder.push_text("genre", &input.genre);
        builder.push_text("publishing_track", &input.publishing_track);
        builder.push_text("platform_type", &input.platform_type);
        builder.push_text("distribution_method", &input.distribution_method);
        if let Some(platforms) = &input.target_platforms {
            builder.push("target_platforms", Bind::Json(serde_json::json!(platforms)));
        }
        builder.push_text("game_url", &input.game_url);
        builder.push_text("build_status", &input.build_status);
        builder.push_bool("requires_launcher", input.requires_launcher);
        builder.push_text("build_format", &input.build_format);
        builder.push_text("age_rating", &input.age_rating);
        builder.push_text("support_email", &input.support_email);
        builder.push_bool("is_public", input.is_public);

        // An empty input still refreshes updated_at.
        builder.execute(pool, id, &[]).await
    }

    /// Delete a project row. Asset rows cascade at the database level.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Onboarding workflow
    // -----------------------------------------------------------------------

    /// Persist the fields present in one step-save payload, optionally
    /// advancing `onboarding_step`, as a single all-or-nothing UPDATE.
    pub async fn apply_step(
        pool: &PgPool,
        id: Uuid,
        payload: &StepPayload,
        advance_to: Option<OnboardingStep>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut builder = UpdateBuilder::new();

        match payload {
            StepPayload::Basics(f) => {
                builder.push_text("short_description", &f.short_description);
                builder.push_text("full_description", &f.full_description);
                builder.push_text("genre", &f.genre);
                builder.push_text("publishing_track", &f.publishing_track);
                builder.push_text("build_status", &f.build_status);
                if let Some(platforms) = &f.target_platforms {
                    builder.push("target_platforms", Bind::Json(serde_json::json!(platforms)));
                }
                builder.push_bool("is_public", f.is_public);
            }
            StepPayload::Assets(_) => {}
            StepPayload::Integration(f) => {
                builder.push_text(
                    "pass_sso_integration_status",
                    &f.pass_sso_integration_status,
                );
                builder.push_text(
                    "readyverse_sdk_integration_status",
                    &f.readyverse_sdk_integration_status,
                );
                builder.push_text("game_url", &f.game_url);
                builder.push_text("launcher_url", &f.launcher_url);
                builder.push_text("integration_notes", &f.integration_notes);
            }
            StepPayload::Compliance(f) => {
                builder.push_text("rating_board", &f.rating_board);
                builder.push_bool(
                    "legal_requirements_completed",
                    f.legal_requirements_completed,
                );
                builder.push_bool("privacy_policy_provided", f.privacy_policy_provided);
                builder.push_bool("terms_accepted", f.terms_accepted);
                builder.push_bool(
                    "content_guidelines_accepted",
                    f.content_guidelines_accepted,
                );
                builder.push_bool(
                    "distribution_rights_confirmed",
                    f.distribution_rights_confirmed,
                );
                builder.push_text("support_email", &f.support_email);
            }
            StepPayload::Review(f) => {
                builder.push_text("review_notes", &f.review_notes);
            }
        }

        if let Some(step) = advance_to {
            builder.push("onboarding_step", Bind::Text(step.as_str().to_string()));
        }

        builder.execute(pool, id, &[]).await
    }

    /// The terminal `review -> done` transition. The completion and intake
    /// stamps are written on the first call only, so a replayed completion
    /// never refreshes them.
    pub async fn complete_onboarding(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET \
                onboarding_step = 'done', \
                onboarding_completed_at = COALESCE(onboarding_completed_at, now()), \
                submission_status = COALESCE(submission_status, 'Intake'), \
                intake_submitted_at = COALESCE(intake_submitted_at, now()), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Upload-pipeline patches
    // -----------------------------------------------------------------------

    /// Patch exactly one primary-asset key column.
    pub async fn patch_primary_asset_key(
        pool: &PgPool,
        id: Uuid,
        field: PrimaryAssetField,
        file_key: &str,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "UPDATE projects SET {} = $2, updated_at = now() WHERE id = $1",
            field.column()
        );
        sqlx::query(&query)
            .bind(id)
            .bind(file_key)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Clear a primary-asset key column, but only if it still points at the
    /// given file. A newer upload may have replaced the pointer already.
    pub async fn clear_primary_asset_key(
        pool: &PgPool,
        id: Uuid,
        field: PrimaryAssetField,
        file_key: &str,
    ) -> Result<(), sqlx::Error> {
        let column = field.column();
        let query = format!(
            "UPDATE projects SET {column} = NULL, updated_at = now() \
             WHERE id = $1 AND {column} = $2"
        );
        sqlx::query(&query)
            .bind(id)
            .bind(file_key)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Append a screenshot key to the collective JSONB array.
    pub async fn append_screenshot_key(
        pool: &PgPool,
        id: Uuid,
        file_key: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE projects SET \
                screenshots_keys = screenshots_keys || to_jsonb($2::text), \
                updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(file_key)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a screenshot key from the collective JSONB array.
    pub async fn remove_screenshot_key(
        pool: &PgPool,
        id: Uuid,
        file_key: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE projects SET \
                screenshots_keys = screenshots_keys - $2, \
                updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(file_key)
        .execute(pool)
        .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Showroom queries (public, fully-onboarded projects only)
    // -----------------------------------------------------------------------

    /// All published games, most recently completed first.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<ShowroomGame>, sqlx::Error> {
        let query = format!(
            "SELECT {SHOWROOM_COLUMNS} FROM projects \
             WHERE {PUBLISHED_FILTER} \
             ORDER BY onboarding_completed_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, ShowroomGame>(&query)
            .fetch_all(pool)
            .await
    }

    /// A single published game by id.
    pub async fn find_published_by_id(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<ShowroomGame>, sqlx::Error> {
        let query = format!(
            "SELECT {SHOWROOM_COLUMNS} FROM projects \
             WHERE {PUBLISHED_FILTER} AND id = $1"
        );
        sqlx::query_as::<_, ShowroomGame>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A single published game by its public slug. The manifest surface is
    /// addressed this way; ids stay internal to the portal.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<ShowroomGame>, sqlx::Error> {
        let query = format!(
            "SELECT {SHOWROOM_COLUMNS} FROM projects \
             WHERE {PUBLISHED_FILTER} AND slug = $1"
        );
        sqlx::query_as::<_, ShowroomGame>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Published games in a genre (case-insensitive exact match).
    pub async fn list_published_by_genre(
        pool: &PgPool,
        genre: &str,
    ) -> Result<Vec<ShowroomGame>, sqlx::Error> {
        let query = format!(
            "SELECT {SHOWROOM_COLUMNS} FROM projects \
             WHERE {PUBLISHED_FILTER} AND LOWER(genre) = LOWER($1) \
             ORDER BY onboarding_completed_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, ShowroomGame>(&query)
            .bind(genre)
            .fetch_all(pool)
            .await
    }

    /// Published games on a publishing track (case-insensitive exact match).
    pub async fn list_published_by_track(
        pool: &PgPool,
        track: &str,
    ) -> Result<Vec<ShowroomGame>, sqlx::Error> {
        let query = format!(
            "SELECT {SHOWROOM_COLUMNS} FROM projects \
             WHERE {PUBLISHED_FILTER} AND LOWER(publishing_track) = LOWER($1) \
             ORDER BY onboarding_completed_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, ShowroomGame>(&query)
            .bind(track)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring search over name and both descriptions.
    pub async fn search_published(
        pool: &PgPool,
        text: &str,
    ) -> Result<Vec<ShowroomGame>, sqlx::Error> {
        let pattern = format!("%{}%", text.replace('%', "\\%").replace('_', "\\_"));
        let query = format!(
            "SELECT {SHOWROOM_COLUMNS} FROM projects \
             WHERE {PUBLISHED_FILTER} AND (\
                name ILIKE $1 \
                OR short_description ILIKE $1 \
                OR full_description ILIKE $1\
             ) \
             ORDER BY onboarding_completed_at DESC NULLS LAST"
        );
        sqlx::query_as::<_, ShowroomGame>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Featured games: the most recently completed published projects.
    pub async fn list_featured(pool: &PgPool) -> Result<Vec<ShowroomGame>, sqlx::Error> {
        let query = format!(
            "SELECT {SHOWROOM_COLUMNS} FROM projects \
             WHERE {PUBLISHED_FILTER} \
             ORDER BY onboarding_completed_at DESC NULLS LAST \
             LIMIT {FEATURED_LIMIT}"
        );
        sqlx::query_as::<_, ShowroomGame>(&query)
            .fetch_all(pool)
            .await
    }
}
