//! Provider response normalization

use crate::types::DeploymentResult;
use serde_json::Value;

/// Extract the public URL and deployment id from a provider response.
pub fn normalize(raw: Value) -> DeploymentResult {
    let url = raw.get("url").and_then(Value::as_str).and_then(normalize_url);
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    DeploymentResult { url, id, raw }
}

/// Bare hosts get an `https://` scheme; URLs that carry one pass through.
pub fn normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }

    if url.contains("://") {
        Some(url.to_string())
    } else {
        Some(format!("https://{}", url))
    }
}
