//! Inbound request validation

use crate::error::ValidationError;
use crate::types::{DeploymentRequest, FileEntry};
use serde_json::{Map, Value};

/// Whether a deployment must carry a non-blank `projectName`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectNamePolicy {
    /// Missing names fall back to the default slug.
    #[default]
    Optional,
    Required,
}

/// Turns a raw request body into a [`DeploymentRequest`] or a tagged rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator {
    policy: ProjectNamePolicy,
}

impl RequestValidator {
    pub fn new(policy: ProjectNamePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ProjectNamePolicy {
        self.policy
    }

    /// Validate raw body bytes. A blank body reads as `{}`.
    pub fn validate(&self, body: &[u8]) -> Result<DeploymentRequest, ValidationError> {
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(body)
                .map_err(|e| ValidationError::MalformedBody(e.to_string()))?
        };
        self.validate_value(value)
    }

    pub fn validate_value(&self, value: Value) -> Result<DeploymentRequest, ValidationError> {
        let Value::Object(mut body) = value else {
            return Err(ValidationError::MalformedBody(
                "expected a JSON object".to_string(),
            ));
        };

        let project_name = match body.remove("projectName") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(_) => {
                return Err(ValidationError::MalformedBody(
                    "projectName must be a string".to_string(),
                ))
            }
        };

        let items = match body.remove("files") {
            Some(Value::Array(items)) if !items.is_empty() => items,
            _ => return Err(ValidationError::MissingFiles),
        };

        let files = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value::<FileEntry>(item)
                    .map_err(|e| ValidationError::MalformedBody(format!("files[{}]: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if !files.iter().any(FileEntry::is_index_html) {
            return Err(ValidationError::MissingIndexHtml);
        }

        let project_name = project_name.filter(|name| !name.trim().is_empty());
        if self.policy == ProjectNamePolicy::Required && project_name.is_none() {
            return Err(ValidationError::MissingProjectName);
        }

        Ok(DeploymentRequest::new(project_name, files))
    }
}
