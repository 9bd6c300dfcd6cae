//! Asset kind registry and upload validation rules.
//!
//! Upload `kind` tags are free-form strings from clients; this module folds
//! them onto a canonical [`AssetKind`] and maps the primary kinds (logo,
//! cover art, trailer) to the dedicated project column they populate.
//! Unknown kinds are not an error: they classify as screenshots and are
//! tracked through asset records only.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Size / type limits
// ---------------------------------------------------------------------------

/// Maximum upload size for images (10 MB).
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Maximum upload size for videos (100 MB).
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

/// Tighter ceiling for MP4 trailers (5 MB) so manifests stay streamable on
/// engine clients.
pub const MAX_TRAILER_MP4_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted by the upload pipeline.
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/webm",
    "video/quicktime",
];

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// Canonical asset kinds. Incoming tags are matched case-insensitively and
/// unrecognized tags default to `Screenshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    CoverArt,
    Trailer,
    Screenshot,
}

/// Dedicated project columns populated by primary asset kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAssetField {
    GameLogoKey,
    CoverArtKey,
    TrailerKey,
}

impl PrimaryAssetField {
    /// The `projects` column this field patches.
    pub fn column(self) -> &'static str {
        match self {
            Self::GameLogoKey => "game_logo_key",
            Self::CoverArtKey => "cover_art_key",
            Self::TrailerKey => "trailer_key",
        }
    }
}

impl AssetKind {
    /// Fold a client-supplied kind tag onto its canonical kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "app_icon" | "logo" => Self::Logo,
            "hero_image" | "cover_art" | "cover" => Self::CoverArt,
            "trailer" => Self::Trailer,
            _ => Self::Screenshot,
        }
    }

    /// Stored kind string (also the storage folder name).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::CoverArt => "cover_art",
            Self::Trailer => "trailer",
            Self::Screenshot => "screenshot",
        }
    }

    /// The project column this kind populates, if it is a primary kind.
    pub fn project_field(self) -> Option<PrimaryAssetField> {
        match self {
            Self::Logo => Some(PrimaryAssetField::GameLogoKey),
            Self::CoverArt => Some(PrimaryAssetField::CoverArtKey),
            Self::Trailer => Some(PrimaryAssetField::TrailerKey),
            Self::Screenshot => None,
        }
    }

    /// Whether this kind counts toward the assets-step completion gate.
    pub fn is_primary(self) -> bool {
        self.project_field().is_some()
    }
}

/// SQL tuple of the primary kind strings, for repository queries.
pub const PRIMARY_KINDS: [&str; 3] = ["logo", "cover_art", "trailer"];

// ---------------------------------------------------------------------------
// Upload validation
// ---------------------------------------------------------------------------

/// Validate an upload's declared MIME type and byte size for the given kind.
///
/// Runs before any side effect. An empty file is rejected outright; each
/// remaining failure mode is a distinct `Validation` error whose message
/// names the violated limit.
pub fn validate_upload(mime_type: &str, size_bytes: u64, kind: AssetKind) -> Result<(), CoreError> {
    if size_bytes == 0 {
        return Err(CoreError::Validation("No file provided.".into()));
    }

    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(CoreError::Validation(format!(
            "Unsupported type '{mime_type}'. Allowed: JPEG, PNG, GIF, WebP images and MP4, WebM, QuickTime videos."
        )));
    }

    let is_video = mime_type.starts_with("video/");
    if is_video {
        if kind == AssetKind::Trailer && mime_type == "video/mp4" {
            if size_bytes > MAX_TRAILER_MP4_BYTES {
                return Err(CoreError::Validation(format!(
                    "Trailer too large. Maximum trailer size is {} MB.",
                    MAX_TRAILER_MP4_BYTES / (1024 * 1024)
                )));
            }
        }
        if size_bytes > MAX_VIDEO_BYTES {
            return Err(CoreError::Validation(format!(
                "File too large. Maximum video size is {} MB.",
                MAX_VIDEO_BYTES / (1024 * 1024)
            )));
        }
    } else if size_bytes > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(format!(
            "File too large. Maximum image size is {} MB.",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
