//! Hosting provider port

use crate::types::DeploymentPayload;
use crate::Result;
use async_trait::async_trait;

/// Sends one deployment to the hosting provider.
///
/// Implementations make at most one attempt per call. A successful return is
/// the provider's parsed JSON body; failures are [`crate::DeployError::Provider`]
/// or [`crate::DeployError::Protocol`].
#[async_trait]
pub trait DeploymentClient: Send + Sync {
    async fn create_deployment(&self, payload: &DeploymentPayload) -> Result<serde_json::Value>;
}
