//! REST list store (Upstash-compatible command endpoint)
//!
//! Each command is POSTed as a JSON array, e.g. `["LPUSH", "key", "value"]`,
//! and answered with `{"result": ...}` or `{"error": "..."}`.

use async_trait::async_trait;
use deployer_core::{DeployError, ListStore, Result};
use reqwest::Client as ReqwestClient;
use serde_json::Value;

pub struct RestListStore {
    http: ReqwestClient,
    url: String,
    token: String,
}

impl RestListStore {
    pub fn new(url: String, token: String) -> Self {
        Self {
            http: ReqwestClient::new(),
            url,
            token,
        }
    }

    async fn command(&self, args: &[&str]) -> Result<Value> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await
            .map_err(|e| DeployError::History(format!("{} failed: {}", args[0], e)))?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            DeployError::History(format!("{} returned unreadable body ({}): {}", args[0], status, e))
        })?;

        if let Some(error) = body.get("error").and_then(Value::as_str) {
            return Err(DeployError::History(format!("{} failed: {}", args[0], error)));
        }
        if !status.is_success() {
            return Err(DeployError::History(format!("{} failed with status {}", args[0], status)));
        }

        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl ListStore for RestListStore {
    async fn push_front(&self, key: &str, value: String) -> Result<usize> {
        let result = self.command(&["LPUSH", key, value.as_str()]).await?;
        result
            .as_u64()
            .map(|len| len as usize)
            .ok_or_else(|| DeployError::History(format!("LPUSH returned {}", result)))
    }

    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<()> {
        let (start, stop) = (start.to_string(), stop.to_string());
        self.command(&["LTRIM", key, start.as_str(), stop.as_str()]).await?;
        Ok(())
    }

    async fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let (start, stop) = (start.to_string(), stop.to_string());
        match self.command(&["LRANGE", key, start.as_str(), stop.as_str()]).await? {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(DeployError::History(format!("LRANGE returned {}", other))),
        }
    }
}
