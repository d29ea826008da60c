//! Deployment request, payload and result types

use serde::{Deserialize, Serialize};

/// One static asset, content already base64 encoded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub content: String,
}

impl FileEntry {
    pub fn is_index_html(&self) -> bool {
        self.name.eq_ignore_ascii_case("index.html")
    }
}

/// A deployment request that passed validation.
///
/// Only [`crate::RequestValidator`] builds these, so `files` is never empty
/// and always holds an `index.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    project_name: Option<String>,
    files: Vec<FileEntry>,
}

impl DeploymentRequest {
    pub(crate) fn new(project_name: Option<String>, files: Vec<FileEntry>) -> Self {
        Self {
            project_name,
            files,
        }
    }

    /// Name as submitted by the caller, if any.
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// URL-safe project name sent to the provider.
    pub fn slug(&self) -> String {
        crate::slug::sanitize(self.project_name.as_deref().unwrap_or_default())
    }
}

/// Body of a provider deployment call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPayload {
    pub name: String,
    pub files: Vec<PayloadFile>,
    pub project_settings: ProjectSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadFile {
    pub file: String,
    pub data: String,
    pub encoding: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSettings {
    /// Always serialized, as `null` for plain static output.
    pub framework: Option<String>,
}

/// Normalized outcome of a successful deployment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentResult {
    pub url: Option<String>,
    pub id: Option<String>,
    pub raw: serde_json::Value,
}
