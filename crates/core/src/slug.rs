//! URL-safe slug generation for project names.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

/// Length of the random suffix appended to every slug.
const SUFFIX_LEN: usize = 8;

fn non_slug_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("static regex"))
}

/// Derive a globally-unique, URL-safe slug from a project name.
///
/// Lowercases the name, folds every run of non-alphanumeric characters into a
/// single `-`, and appends an 8-hex-char random suffix so two projects with
/// the same name still get distinct slugs.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let base = non_slug_chars().replace_all(&lowered, "-");
    let base = base.trim_matches('-');

    let suffix = &Uuid::new_v4().simple().to_string()[..SUFFIX_LEN];
    if base.is_empty() {
        format!("project-{suffix}")
    } else {
        format!("{base}-{suffix}")
    }
}
