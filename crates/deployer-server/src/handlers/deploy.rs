//! Deployment handler

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::BytesRejection, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use deployer_core::DeployError;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

/// Lets a caller ask for a tighter deadline than the server default.
pub const REQUEST_TIMEOUT_HEADER: &str = "x-request-timeout-ms";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    success: bool,
    url: Option<String>,
    deployment_id: Option<String>,
    raw: Value,
}

/// Deadline for the provider call: the server default, shortened by the
/// caller's own timeout header when that is smaller.
fn request_deadline(headers: &HeaderMap, default: Duration) -> Duration {
    headers
        .get(REQUEST_TIMEOUT_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .map(|requested| requested.min(default))
        .unwrap_or(default)
}

pub async fn deploy(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<DeployResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        info!("Rejected deploy body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;
    let deadline = request_deadline(&headers, state.request_timeout);

    let result = state
        .deployments
        .submit(&body, deadline)
        .await
        .map_err(|e| {
            match &e {
                DeployError::Validation(v) => info!("Rejected deploy request: {}", v),
                DeployError::Configuration(msg) => error!("Deploy misconfigured: {}", msg),
                _ => warn!("Deploy failed: {}", e),
            }
            ApiError::from(e)
        })?;

    Ok(Json(DeployResponse {
        success: true,
        url: result.url,
        deployment_id: result.id,
        raw: result.raw,
    }))
}
