//! Error types for the deployer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeployError>;

/// Number of characters of an unparseable provider body kept for diagnostics.
pub const EXCERPT_CHARS: usize = 400;

/// Rejections produced while validating an inbound deployment request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid JSON body: {0}")]
    MalformedBody(String),

    #[error("No files provided")]
    MissingFiles,

    #[error("index.html not found in the submitted files")]
    MissingIndexHtml,

    #[error("projectName is required")]
    MissingProjectName,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MalformedBody(_) => "malformed_body",
            ValidationError::MissingFiles => "missing_files",
            ValidationError::MissingIndexHtml => "missing_index_html",
            ValidationError::MissingProjectName => "missing_project_name",
        }
    }
}

#[derive(Error, Debug)]
pub enum DeployError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider answered with a failure status.
    #[error("Provider error ({status}): {message}")]
    Provider {
        status: u16,
        message: String,
        details: serde_json::Value,
    },

    /// The provider response could not be parsed.
    #[error("Unparseable provider response")]
    Protocol {
        status: Option<u16>,
        excerpt: String,
    },

    #[error("History store error: {0}")]
    History(String),
}

impl DeployError {
    /// Build a protocol error keeping only the head of the raw body.
    pub fn protocol(status: Option<u16>, raw_body: &str) -> Self {
        DeployError::Protocol {
            status,
            excerpt: excerpt(raw_body),
        }
    }

    /// Provider failure for a call that ran past its deadline.
    pub fn timeout(after: std::time::Duration) -> Self {
        DeployError::Provider {
            status: 504,
            message: format!(
                "Deployment provider timed out after {}ms",
                after.as_millis()
            ),
            details: serde_json::json!({ "timeout": true }),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DeployError::Validation(e) => e.code(),
            DeployError::Configuration(_) => "configuration_error",
            DeployError::Provider { .. } => "provider_error",
            DeployError::Protocol { .. } => "protocol_error",
            DeployError::History(_) => "history_error",
        }
    }
}

/// First [`EXCERPT_CHARS`] characters of `raw`, never splitting a code point.
pub fn excerpt(raw: &str) -> String {
    raw.chars().take(EXCERPT_CHARS).collect()
}
