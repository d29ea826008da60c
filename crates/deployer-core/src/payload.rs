//! Provider payload construction

use crate::types::{DeploymentPayload, DeploymentRequest, PayloadFile, ProjectSettings};

const BASE64_ENCODING: &str = "base64";

/// Shape a validated request into the provider's multi-file deployment body.
pub fn build_payload(request: &DeploymentRequest, name: &str) -> DeploymentPayload {
    let files = request
        .files()
        .iter()
        .map(|f| PayloadFile {
            file: f.name.clone(),
            data: f.content.clone(),
            encoding: BASE64_ENCODING.to_string(),
        })
        .collect();

    DeploymentPayload {
        name: name.to_string(),
        files,
        project_settings: ProjectSettings::default(),
    }
}
