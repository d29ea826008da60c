//! Deployment submission pipeline
//!
//! validate → build payload → provider call → normalize → record history.

use deployer_core::{
    build_payload, normalize, DeployError, DeploymentClient, DeploymentResult, HistoryEntry,
    HistoryLedger, RequestValidator, Result,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Upper bound on the side-channel history write after a deployment.
const HISTORY_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DeploymentService {
    validator: RequestValidator,
    client: Option<Arc<dyn DeploymentClient>>,
    ledger: HistoryLedger,
}

impl DeploymentService {
    /// `client` is `None` when no provider token is configured; every
    /// submission that passes validation then fails with a configuration error.
    pub fn new(
        validator: RequestValidator,
        client: Option<Arc<dyn DeploymentClient>>,
        ledger: HistoryLedger,
    ) -> Self {
        Self {
            validator,
            client,
            ledger,
        }
    }

    /// Run one deployment. The provider call is bounded by `deadline`.
    ///
    /// History is recorded only after the provider accepted the deployment,
    /// and its failure never changes the returned result.
    pub async fn submit(&self, body: &[u8], deadline: Duration) -> Result<DeploymentResult> {
        let request = self.validator.validate(body)?;

        let client = self
            .client
            .as_ref()
            .ok_or_else(|| DeployError::Configuration("VERCEL_TOKEN is not set".to_string()))?;

        let name = request.slug();
        let payload = build_payload(&request, &name);
        info!("Deploying {} ({} files)", name, request.file_count());

        let raw = tokio::time::timeout(deadline, client.create_deployment(&payload))
            .await
            .map_err(|_| DeployError::timeout(deadline))??;
        let result = normalize(raw);
        info!(
            "Deployed {}: url={:?}, id={:?}",
            name, result.url, result.id
        );

        let entry = HistoryEntry::new(name, result.url.clone(), request.file_count());
        if tokio::time::timeout(HISTORY_WRITE_TIMEOUT, self.ledger.record(&entry))
            .await
            .is_err()
        {
            warn!("Deploy history write timed out, skipping");
        }

        Ok(result)
    }
}
