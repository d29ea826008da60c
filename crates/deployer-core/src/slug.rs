//! Project name sanitization

use once_cell::sync::Lazy;
use regex::Regex;

/// Used when a project name sanitizes down to nothing.
pub const DEFAULT_PROJECT_NAME: &str = "deployer-app";

static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("static regex is valid"));
static DASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("static regex is valid"));

/// Turn an arbitrary project name into a URL-safe slug.
///
/// Lower-cases, maps everything outside `[a-z0-9-]` to `-`, collapses dash runs
/// and trims dashes at both ends. Idempotent.
pub fn sanitize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = DISALLOWED.replace_all(&lowered, "-");
    let collapsed = DASH_RUNS.replace_all(&replaced, "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        DEFAULT_PROJECT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
