//! Vercel deployments API client

use async_trait::async_trait;
use deployer_core::{DeployError, DeploymentClient, DeploymentPayload, Result};
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use tracing::{debug, error, warn};

pub const DEFAULT_VERCEL_API_URL: &str = "https://api.vercel.com";

const DEPLOYMENTS_PATH: &str = "/v13/deployments";
const FALLBACK_ERROR: &str = "Failed to deploy to Vercel";

pub struct VercelClient {
    http: ReqwestClient,
    base_url: String,
    token: String,
    team_id: Option<String>,
}

impl VercelClient {
    pub fn new(token: String) -> Self {
        Self {
            http: ReqwestClient::new(),
            base_url: DEFAULT_VERCEL_API_URL.to_string(),
            token,
            team_id: None,
        }
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    pub fn with_team_id(mut self, team_id: Option<String>) -> Self {
        self.team_id = team_id;
        self
    }

    fn deployments_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), DEPLOYMENTS_PATH)
    }
}

#[async_trait]
impl DeploymentClient for VercelClient {
    async fn create_deployment(&self, payload: &DeploymentPayload) -> Result<Value> {
        let mut request = self
            .http
            .post(self.deployments_url())
            .bearer_auth(&self.token)
            .json(payload);
        if let Some(team_id) = &self.team_id {
            request = request.query(&[("teamId", team_id)]);
        }

        debug!("POST {} ({} files)", self.deployments_url(), payload.files.len());
        let response = request.send().await.map_err(|e| {
            error!("Failed to reach Vercel: {}", e);
            DeployError::Provider {
                status: 502,
                message: format!("Failed to reach deployment provider: {}", e),
                details: Value::Null,
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeployError::protocol(Some(status.as_u16()), &e.to_string()))?;

        let parsed = match serde_json::from_str::<Value>(&body) {
            Ok(value) if value.is_object() => value,
            _ => {
                warn!("Unparseable Vercel response (status {})", status);
                return Err(DeployError::protocol(Some(status.as_u16()), &body));
            }
        };

        if !status.is_success() {
            error!("Vercel error ({}): {}", status, parsed);
            return Err(DeployError::Provider {
                status: status.as_u16(),
                message: provider_message(&parsed),
                details: parsed,
            });
        }

        Ok(parsed)
    }
}

/// Pick the most specific message out of a Vercel error body.
fn provider_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .or_else(|| body.pointer("/error/code").and_then(Value::as_str))
        .or_else(|| body.get("message").and_then(Value::as_str))
        .unwrap_or(FALLBACK_ERROR)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_stub, StubReply};
    use axum::http::StatusCode;
    use deployer_core::{build_payload, RequestValidator};
    use serde_json::json;

    fn payload() -> DeploymentPayload {
        let request = RequestValidator::default()
            .validate(
                json!({"projectName": "My Site", "files": [{"name": "index.html", "content": "PGgxPmhpPC9oMT4="}]})
                    .to_string()
                    .as_bytes(),
            )
            .unwrap();
        build_payload(&request, &request.slug())
    }

    #[test]
    fn test_provider_message_precedence() {
        assert_eq!(
            provider_message(&json!({"error": {"code": "bad_request", "message": "Invalid name"}})),
            "Invalid name"
        );
        assert_eq!(provider_message(&json!({"error": {"code": "forbidden"}})), "forbidden");
        assert_eq!(provider_message(&json!({"message": "Rate limited"})), "Rate limited");
        assert_eq!(provider_message(&json!({})), FALLBACK_ERROR);
    }

    #[tokio::test]
    async fn test_sends_payload_with_auth_and_team() {
        let stub = spawn_stub(StubReply::json(
            StatusCode::OK,
            json!({"url": "my-site-abc123.example", "id": "dep_1"}),
        ))
        .await;

        let client = VercelClient::new("tok_123".to_string())
            .with_base_url(stub.base_url.clone())
            .with_team_id(Some("team_9".to_string()));
        let raw = client.create_deployment(&payload()).await.unwrap();
        assert_eq!(raw["id"], "dep_1");

        let seen = stub.requests().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/v13/deployments");
        assert_eq!(seen[0].query.as_deref(), Some("teamId=team_9"));
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok_123"));
        assert_eq!(seen[0].body["name"], "my-site");
        assert_eq!(seen[0].body["files"][0]["encoding"], "base64");
        assert_eq!(seen[0].body["projectSettings"]["framework"], Value::Null);
    }

    #[tokio::test]
    async fn test_error_status_is_provider_error() {
        let stub = spawn_stub(StubReply::json(
            StatusCode::FORBIDDEN,
            json!({"error": {"code": "forbidden", "message": "Not authorized"}}),
        ))
        .await;

        let client = VercelClient::new("bad".to_string()).with_base_url(stub.base_url.clone());
        match client.create_deployment(&payload()).await {
            Err(DeployError::Provider {
                status,
                message,
                details,
            }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "Not authorized");
                assert_eq!(details["error"]["code"], "forbidden");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(stub.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_html_body_is_protocol_error() {
        let body = format!("<html>Error</html>{}", "x".repeat(1000));
        let stub = spawn_stub(StubReply::text(StatusCode::BAD_GATEWAY, &body)).await;

        let client = VercelClient::new("tok".to_string()).with_base_url(stub.base_url.clone());
        match client.create_deployment(&payload()).await {
            Err(DeployError::Protocol { status, excerpt }) => {
                assert_eq!(status, Some(502));
                assert_eq!(excerpt.chars().count(), 400);
                assert!(excerpt.starts_with("<html>Error</html>"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(stub.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        // Port 9 on localhost is not expected to accept HTTP connections.
        let client =
            VercelClient::new("tok".to_string()).with_base_url("http://127.0.0.1:9".to_string());
        match client.create_deployment(&payload()).await {
            Err(DeployError::Provider { status, .. }) => assert_eq!(status, 502),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
