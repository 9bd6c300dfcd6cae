//! Onboarding step machine: step ordering, per-step typed payloads, and the
//! pure validation rules that gate advancing.
//!
//! The wizard is strictly linear: `basics -> assets -> integration ->
//! compliance -> review -> done`. "Back" is a client-side concern and never
//! reaches the server, so a project's persisted step is always the furthest
//! step reached. Each step's fields arrive as a `{ "step": ..., ...fields }`
//! payload which deserializes into one [`StepPayload`] variant; an unknown
//! step name fails deserialization instead of reaching any handler logic.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The five wizard steps plus the terminal `done` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStep {
    Basics,
    Assets,
    Integration,
    Compliance,
    Review,
    Done,
}

/// All steps in wizard order, terminal state last.
pub const STEP_ORDER: [OnboardingStep; 6] = [
    OnboardingStep::Basics,
    OnboardingStep::Assets,
    OnboardingStep::Integration,
    OnboardingStep::Compliance,
    OnboardingStep::Review,
    OnboardingStep::Done,
];

impl OnboardingStep {
    /// Parse a step string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "basics" => Ok(Self::Basics),
            "assets" => Ok(Self::Assets),
            "integration" => Ok(Self::Integration),
            "compliance" => Ok(Self::Compliance),
            "review" => Ok(Self::Review),
            "done" => Ok(Self::Done),
            _ => Err(CoreError::Validation(format!(
                "Invalid onboarding step '{s}'. Must be one of: \
                 basics, assets, integration, compliance, review, done"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basics => "basics",
            Self::Assets => "assets",
            Self::Integration => "integration",
            Self::Compliance => "compliance",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// The next step in the linear order. `review` does not advance here --
    /// the `review -> done` transition only happens through completion.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Basics => Some(Self::Assets),
            Self::Assets => Some(Self::Integration),
            Self::Integration => Some(Self::Compliance),
            Self::Compliance => Some(Self::Review),
            Self::Review | Self::Done => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Save modes
// ---------------------------------------------------------------------------

/// How a step-save call should be treated.
///
/// - `advance`: required fields are validated and the project's step moves
///   forward (only when the saved step is the current furthest step).
/// - `skip`: fields are persisted as-is and the step advances without
///   required-field validation.
/// - `autosave`: fields are persisted, the step never moves. Used by the
///   client's debounced mid-step saves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveMode {
    #[default]
    Advance,
    Skip,
    Autosave,
}

// ---------------------------------------------------------------------------
// Per-step payloads
// ---------------------------------------------------------------------------

/// Field limits for the basics step.
pub const SHORT_DESCRIPTION_MIN: usize = 10;
pub const SHORT_DESCRIPTION_MAX: usize = 500;
pub const FULL_DESCRIPTION_MAX: usize = 2000;

/// Stored canonical value for the self-hosted publishing track.
///
/// The portal UI historically submitted `Self Hosted` while the stored value
/// is `Self-Hosted`; the mismatch is normalized here and nowhere else.
pub const TRACK_SELF_HOSTED: &str = "Self-Hosted";

/// A step-save payload, tagged by step name.
///
/// One variant per wizard step, each carrying only the fields that step
/// recognizes. Fields are all optional at the type level: a save persists
/// whatever subset is present, and [`StepPayload::validate`] decides whether
/// the step may advance.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum StepPayload {
    Basics(BasicsFields),
    Assets(AssetsFields),
    Integration(IntegrationFields),
    Compliance(ComplianceFields),
    Review(ReviewFields),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicsFields {
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub genre: Option<String>,
    pub publishing_track: Option<String>,
    pub build_status: Option<String>,
    pub target_platforms: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// The assets step carries no direct fields; completion is tracked through
/// asset records. See [`validate_assets_advance`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetsFields {}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntegrationFields {
    pub pass_sso_integration_status: Option<String>,
    pub readyverse_sdk_integration_status: Option<String>,
    pub game_url: Option<String>,
    pub launcher_url: Option<String>,
    pub integration_notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplianceFields {
    pub rating_board: Option<String>,
    pub legal_requirements_completed: Option<bool>,
    pub privacy_policy_provided: Option<bool>,
    pub terms_accepted: Option<bool>,
    pub content_guidelines_accepted: Option<bool>,
    pub distribution_rights_confirmed: Option<bool>,
    pub support_email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewFields {
    pub review_notes: Option<String>,
}

impl StepPayload {
    /// The step this payload belongs to.
    pub fn step(&self) -> OnboardingStep {
        match self {
            Self::Basics(_) => OnboardingStep::Basics,
            Self::Assets(_) => OnboardingStep::Assets,
            Self::Integration(_) => OnboardingStep::Integration,
            Self::Compliance(_) => OnboardingStep::Compliance,
            Self::Review(_) => OnboardingStep::Review,
        }
    }

    /// Apply stored-value normalizations before persistence.
    pub fn normalize(&mut self) {
        if let Self::Basics(fields) = self {
            if let Some(track) = &fields.publishing_track {
                if track.eq_ignore_ascii_case("self hosted") {
                    fields.publishing_track = Some(TRACK_SELF_HOSTED.to_string());
                }
            }
        }
    }

    /// Validate the required-to-advance rules for this step.
    ///
    /// Skipped entirely for `skip` and `autosave` saves. Errors collect all
    /// failing fields into one message so the client can show them together.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors: Vec<String> = Vec::new();

        match self {
            Self::Basics(f) => {
                match f.short_description.as_deref().map(str::trim) {
                    None | Some("") => errors.push("Short description is required".into()),
                    Some(s) if s.chars().count() < SHORT_DESCRIPTION_MIN => errors.push(format!(
                        "Short description must be at least {SHORT_DESCRIPTION_MIN} characters"
                    )),
                    Some(s) if s.chars().count() > SHORT_DESCRIPTION_MAX => errors.push(format!(
                        "Short description must be less than {SHORT_DESCRIPTION_MAX} characters"
                    )),
                    _ => {}
                }
                if let Some(full) = &f.full_description {
                    if full.chars().count() > FULL_DESCRIPTION_MAX {
                        errors.push(format!(
                            "Full description must be less than {FULL_DESCRIPTION_MAX} characters"
                        ));
                    }
                }
                if is_blank(&f.genre) {
                    errors.push("Genre is required".into());
                }
                if is_blank(&f.publishing_track) {
                    errors.push("Publishing track is required".into());
                }
                if is_blank(&f.build_status) {
                    errors.push("Build status is required".into());
                }
            }
            // Asset presence is checked against asset records, not payload
            // fields; see validate_assets_advance.
            Self::Assets(_) => {}
            Self::Integration(f) => {
                if is_blank(&f.pass_sso_integration_status) {
                    errors.push("Pass SSO integration status is required".into());
                }
                if is_blank(&f.readyverse_sdk_integration_status) {
                    errors.push("Readyverse SDK integration status is required".into());
                }
                if let Some(url) = f.game_url.as_deref() {
                    if !url.trim().is_empty() && !is_valid_http_url(url) {
                        errors.push("Game URL must be a valid URL".into());
                    }
                }
                if let Some(url) = f.launcher_url.as_deref() {
                    if !url.trim().is_empty() && !is_valid_http_url(url) {
                        errors.push("Launcher URL must be a valid URL".into());
                    }
                }
            }
            Self::Compliance(f) => {
                if f.legal_requirements_completed != Some(true) {
                    errors.push("Legal requirements must be completed".into());
                }
                if f.privacy_policy_provided != Some(true) {
                    errors.push("Privacy policy must be provided".into());
                }
                if f.terms_accepted != Some(true) {
                    errors.push("Terms must be accepted".into());
                }
                if f.content_guidelines_accepted != Some(true) {
                    errors.push("Content guidelines must be accepted".into());
                }
                if let Some(email) = f.support_email.as_deref() {
                    if !email.trim().is_empty() && !email.validate_email() {
                        errors.push("Support email must be a valid email address".into());
                    }
                }
            }
            Self::Review(_) => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(errors.join("; ")))
        }
    }
}

/// Server-side gate for advancing out of the assets step: at least one
/// primary-kind asset (logo, cover art, or trailer) must have been uploaded.
pub fn validate_assets_advance(primary_asset_count: i64) -> Result<(), CoreError> {
    if primary_asset_count >= 1 {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "At least one of the logo, cover art, or trailer assets must be uploaded".into(),
        ))
    }
}

/// Validate the `review -> done` completion transition.
///
/// The project must have reached the review step and all four compliance
/// confirmations must hold on the persisted record. Completing an
/// already-done project passes, so replayed completion calls are
/// idempotent.
pub fn validate_completion(
    current: OnboardingStep,
    legal_requirements_completed: bool,
    privacy_policy_provided: bool,
    terms_accepted: bool,
    content_guidelines_accepted: bool,
) -> Result<(), CoreError> {
    if current != OnboardingStep::Review && current != OnboardingStep::Done {
        return Err(CoreError::Validation(format!(
            "Cannot complete onboarding from step '{}'. The review step must be reached first.",
            current.as_str()
        )));
    }

    let mut errors: Vec<String> = Vec::new();
    if !legal_requirements_completed {
        errors.push("Legal requirements must be completed".into());
    }
    if !privacy_policy_provided {
        errors.push("Privacy policy must be provided".into());
    }
    if !terms_accepted {
        errors.push("Terms must be accepted".into());
    }
    if !content_guidelines_accepted {
        errors.push("Content guidelines must be accepted".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(errors.join("; ")))
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Minimal absolute-URL check: http or https scheme with a non-empty host.
fn is_valid_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split('/').next().unwrap_or("");
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    // -- OnboardingStep --

    #[test]
    fn step_from_str_roundtrip() {
        for step in STEP_ORDER {
            assert_eq!(OnboardingStep::from_str_db(step.as_str()).unwrap(), step);
        }
    }

    #[test]
    fn step_from_str_invalid() {
        assert!(OnboardingStep::from_str_db("showroom").is_err());
        assert!(OnboardingStep::from_str_db("").is_err());
        assert!(OnboardingStep::from_str_db("Basics").is_err());
    }

    #[test]
    fn step_order_is_strictly_linear() {
        for window in STEP_ORDER[..5].windows(2) {
            if window[0] == OnboardingStep::Review {
                continue;
            }
            assert_eq!(window[0].next(), Some(window[1]));
        }
        assert_eq!(OnboardingStep::Review.next(), None);
        assert_eq!(OnboardingStep::Done.next(), None);
    }

    // -- Payload deserialization --

    #[test]
    fn payload_deserializes_by_step_tag() {
        let payload: StepPayload = serde_json::from_value(json!({
            "step": "basics",
            "shortDescription": "A ten+ char description",
            "genre": "Action",
        }))
        .unwrap();
        assert_eq!(payload.step(), OnboardingStep::Basics);
        assert_matches!(payload, StepPayload::Basics(f) if f.genre.as_deref() == Some("Action"));
    }

    #[test]
    fn payload_rejects_unknown_step() {
        let result: Result<StepPayload, _> =
            serde_json::from_value(json!({ "step": "publishing" }));
        assert!(result.is_err());
    }

    #[test]
    fn payload_rejects_terminal_step() {
        // `done` is not a saveable step.
        let result: Result<StepPayload, _> = serde_json::from_value(json!({ "step": "done" }));
        assert!(result.is_err());
    }

    #[test]
    fn payload_ignores_fields_from_other_steps() {
        let payload: StepPayload = serde_json::from_value(json!({
            "step": "review",
            "reviewNotes": "ready",
            "shortDescription": "does not belong here",
        }))
        .unwrap();
        assert_matches!(payload, StepPayload::Review(f) if f.review_notes.as_deref() == Some("ready"));
    }

    // -- Normalization --

    #[test]
    fn normalizes_self_hosted_track() {
        let mut payload: StepPayload = serde_json::from_value(json!({
            "step": "basics",
            "publishingTrack": "Self Hosted",
        }))
        .unwrap();
        payload.normalize();
        assert_matches!(
            payload,
            StepPayload::Basics(f) if f.publishing_track.as_deref() == Some(TRACK_SELF_HOSTED)
        );
    }

    #[test]
    fn normalize_leaves_other_tracks_alone() {
        let mut payload: StepPayload = serde_json::from_value(json!({
            "step": "basics",
            "publishingTrack": "Platform Games",
        }))
        .unwrap();
        payload.normalize();
        assert_matches!(
            payload,
            StepPayload::Basics(f) if f.publishing_track.as_deref() == Some("Platform Games")
        );
    }

    // -- Basics validation --

    fn valid_basics() -> StepPayload {
        serde_json::from_value(json!({
            "step": "basics",
            "shortDescription": "A ten+ char description",
            "genre": "Action",
            "publishingTrack": "Self Hosted",
            "buildStatus": "Beta",
        }))
        .unwrap()
    }

    #[test]
    fn basics_valid_payload_passes() {
        assert!(valid_basics().validate().is_ok());
    }

    #[test]
    fn basics_requires_short_description() {
        let payload: StepPayload = serde_json::from_value(json!({
            "step": "basics",
            "genre": "Action",
            "publishingTrack": "Self-Hosted",
            "buildStatus": "Beta",
        }))
        .unwrap();
        let err = payload.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Short description is required"));
    }

    #[test]
    fn basics_short_description_length_bounds() {
        let too_short: StepPayload = serde_json::from_value(json!({
            "step": "basics",
            "shortDescription": "tiny",
            "genre": "Action",
            "publishingTrack": "Self-Hosted",
            "buildStatus": "Beta",
        }))
        .unwrap();
        assert!(too_short.validate().is_err());

        let too_long: StepPayload = serde_json::from_value(json!({
            "step": "basics",
            "shortDescription": "x".repeat(501),
            "genre": "Action",
            "publishingTrack": "Self-Hosted",
            "buildStatus": "Beta",
        }))
        .unwrap();
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn basics_collects_all_errors() {
        let payload: StepPayload = serde_json::from_value(json!({ "step": "basics" })).unwrap();
        let err = payload.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.contains("Short description is required"));
            assert!(msg.contains("Genre is required"));
            assert!(msg.contains("Publishing track is required"));
            assert!(msg.contains("Build status is required"));
        });
    }

    // -- Assets step --

    #[test]
    fn assets_payload_itself_always_validates() {
        let payload: StepPayload = serde_json::from_value(json!({ "step": "assets" })).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn assets_advance_requires_a_primary_asset() {
        assert!(validate_assets_advance(0).is_err());
        assert!(validate_assets_advance(1).is_ok());
        assert!(validate_assets_advance(3).is_ok());
    }

    // -- Integration validation --

    #[test]
    fn integration_requires_both_statuses() {
        let payload: StepPayload = serde_json::from_value(json!({
            "step": "integration",
            "passSsoIntegrationStatus": "In Progress",
        }))
        .unwrap();
        let err = payload.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.contains("Readyverse SDK integration status is required"));
            assert!(!msg.contains("Pass SSO"));
        });
    }

    #[test]
    fn integration_rejects_malformed_game_url() {
        let payload: StepPayload = serde_json::from_value(json!({
            "step": "integration",
            "passSsoIntegrationStatus": "Complete",
            "readyverseSdkIntegrationStatus": "Complete",
            "gameUrl": "not a url",
        }))
        .unwrap();
        assert!(payload.validate().is_err());

        let payload: StepPayload = serde_json::from_value(json!({
            "step": "integration",
            "passSsoIntegrationStatus": "Complete",
            "readyverseSdkIntegrationStatus": "Complete",
            "gameUrl": "https://play.example.com/game",
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    // -- Compliance validation --

    #[test]
    fn compliance_requires_all_four_confirmations() {
        let payload: StepPayload = serde_json::from_value(json!({
            "step": "compliance",
            "legalRequirementsCompleted": true,
            "privacyPolicyProvided": true,
            "termsAccepted": true,
            "contentGuidelinesAccepted": false,
        }))
        .unwrap();
        let err = payload.validate().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) => {
            assert!(msg.contains("Content guidelines must be accepted"));
        });
    }

    #[test]
    fn compliance_valid_with_all_true() {
        let payload: StepPayload = serde_json::from_value(json!({
            "step": "compliance",
            "legalRequirementsCompleted": true,
            "privacyPolicyProvided": true,
            "termsAccepted": true,
            "contentGuidelinesAccepted": true,
            "supportEmail": "support@example.com",
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn compliance_rejects_bad_support_email() {
        let payload: StepPayload = serde_json::from_value(json!({
            "step": "compliance",
            "legalRequirementsCompleted": true,
            "privacyPolicyProvided": true,
            "termsAccepted": true,
            "contentGuidelinesAccepted": true,
            "supportEmail": "not-an-email",
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    // -- Review / completion --

    #[test]
    fn review_step_has_no_required_fields() {
        let payload: StepPayload = serde_json::from_value(json!({ "step": "review" })).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn completion_requires_review_step() {
        let err =
            validate_completion(OnboardingStep::Compliance, true, true, true, true).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("review"));
    }

    #[test]
    fn completion_rejects_missing_legal_confirmation() {
        let err = validate_completion(OnboardingStep::Review, false, true, true, true).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Legal requirements"));
    }

    #[test]
    fn completion_succeeds_with_all_confirmations() {
        assert!(validate_completion(OnboardingStep::Review, true, true, true, true).is_ok());
    }

    #[test]
    fn completion_is_idempotent_once_done() {
        assert!(validate_completion(OnboardingStep::Done, true, true, true, true).is_ok());
    }

    // -- SaveMode --

    #[test]
    fn save_mode_defaults_to_advance() {
        assert_eq!(SaveMode::default(), SaveMode::Advance);
    }

    #[test]
    fn save_mode_parses_lowercase() {
        assert_eq!(
            serde_json::from_value::<SaveMode>(json!("autosave")).unwrap(),
            SaveMode::Autosave
        );
        assert_eq!(
            serde_json::from_value::<SaveMode>(json!("skip")).unwrap(),
            SaveMode::Skip
        );
    }

    // -- URL helper --

    #[test]
    fn url_check_accepts_http_and_https_only() {
        assert!(is_valid_http_url("https://example.com"));
        assert!(is_valid_http_url("http://example.com/path?x=1"));
        assert!(!is_valid_http_url("ftp://example.com"));
        assert!(!is_valid_http_url("https://"));
        assert!(!is_valid_http_url("example.com"));
    }
}
