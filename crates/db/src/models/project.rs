//! Project row model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use showroom_core::types::Timestamp;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub owner_id: Uuid,

    // Company information
    pub company_name: Option<String>,
    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub company_website: Option<String>,
    pub company_socials: Option<String>,

    // Game information
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub genre: Option<String>,
    pub publishing_track: Option<String>,
    pub platform_type: Option<String>,
    pub distribution_method: Option<String>,
    /// Ordered list of target platform names, stored as JSONB.
    pub target_platforms: serde_json::Value,
    pub game_url: Option<String>,
    pub build_status: Option<String>,

    // Technical integration
    pub pass_sso_integration_status: Option<String>,
    pub readyverse_sdk_integration_status: Option<String>,
    pub requires_launcher: bool,
    pub launcher_url: Option<String>,
    pub build_format: Option<String>,
    pub integration_notes: Option<String>,

    // Compliance
    pub age_rating: Option<String>,
    pub rating_board: Option<String>,
    pub legal_requirements_completed: bool,
    pub privacy_policy_provided: bool,
    pub terms_accepted: bool,
    pub content_guidelines_accepted: bool,
    pub distribution_rights_confirmed: bool,
    pub support_email: Option<String>,

    // Primary asset storage keys
    pub game_logo_key: Option<String>,
    pub cover_art_key: Option<String>,
    pub trailer_key: Option<String>,
    /// Screenshot storage keys, tracked collectively as a JSONB array.
    pub screenshots_keys: serde_json::Value,

    // Onboarding workflow
    pub onboarding_step: String,
    pub onboarding_completed_at: Option<Timestamp>,

    // Submission workflow
    pub submission_status: Option<String>,
    pub intake_submitted_at: Option<Timestamp>,
    pub technical_integration_submitted_at: Option<Timestamp>,
    pub compliance_review_submitted_at: Option<Timestamp>,
    pub game_submission_submitted_at: Option<Timestamp>,
    pub approved_at: Option<Timestamp>,
    pub rejection_reason: Option<String>,
    pub review_notes: Option<String>,

    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /projects`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

/// Partial update for `PUT /projects/{id}`.
///
/// Only descriptive fields are owner-editable here; workflow fields move
/// through the onboarding endpoints and asset keys through the upload
/// pipeline. Absent fields are left untouched (field-level partial update).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub company_name: Option<String>,
    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,
    pub company_website: Option<String>,
    pub company_socials: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub genre: Option<String>,
    pub publishing_track: Option<String>,
    pub platform_type: Option<String>,
    pub distribution_method: Option<String>,
    pub target_platforms: Option<Vec<String>>,
    pub game_url: Option<String>,
    pub build_status: Option<String>,
    pub requires_launcher: Option<bool>,
    pub build_format: Option<String>,
    pub age_rating: Option<String>,
    pub support_email: Option<String>,
    pub is_public: Option<bool>,
}

/// Public subset of a project for showroom listings.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowroomGame {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub company_name: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub genre: Option<String>,
    pub publishing_track: Option<String>,
    pub platform_type: Option<String>,
    pub build_status: Option<String>,
    pub game_url: Option<String>,
    pub onboarding_completed_at: Option<Timestamp>,
    pub updated_at: Timestamp,
}
