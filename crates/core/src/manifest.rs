//! Pure classification logic for the public showroom manifest.
//!
//! The manifest builder walks a project's assets, attaches a signed URL to
//! each, and folds them into one [`ManifestAssets`] document: screenshots
//! accumulate into an ordered list, the trailer becomes a structured source
//! object, and the remaining primary kinds become flat URL entries.

use serde::Serialize;

use crate::assets::AssetKind;

/// The trailer entry of a manifest.
///
/// `source_type` is `"file"` when the stored asset is a video the engine
/// should stream directly, `"url"` when it is a link-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailerSource {
    #[serde(rename = "type")]
    pub source_type: &'static str,
    pub src: String,
    pub duration: Option<i32>,
}

/// The `assets` section of a manifest document.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestAssets {
    pub logo: Option<String>,
    pub cover_art: Option<String>,
    pub trailer: Option<TrailerSource>,
    pub screenshots: Vec<String>,
}

impl ManifestAssets {
    /// Fold one asset (already resolved to a signed URL) into the document.
    ///
    /// Screenshots keep their load order; for the single-slot kinds the last
    /// uploaded asset wins, matching the project-field patch semantics of
    /// the upload pipeline.
    pub fn push(
        &mut self,
        kind: AssetKind,
        mime_type: &str,
        signed_url: String,
        duration: Option<i32>,
    ) {
        match kind {
            AssetKind::Screenshot => self.screenshots.push(signed_url),
            AssetKind::Trailer => {
                let source_type = if mime_type.starts_with("video/") {
                    "file"
                } else {
                    "url"
                };
                self.trailer = Some(TrailerSource {
                    source_type,
                    src: signed_url,
                    duration,
                });
            }
            AssetKind::Logo => self.logo = Some(signed_url),
            AssetKind::CoverArt => self.cover_art = Some(signed_url),
        }
    }
}
