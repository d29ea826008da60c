//! Server configuration, read from environment variables

use config::{Config, ConfigError, Environment};
use deployer_core::{ProjectNamePolicy, DEFAULT_HISTORY_KEY};
use serde::Deserialize;
use std::time::Duration;

use crate::api::vercel::DEFAULT_VERCEL_API_URL;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: i64 = 60;
const DEFAULT_MAX_BODY_BYTES: i64 = 32 * 1024 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    vercel_token: Option<String>,
    vercel_team_id: Option<String>,
    pub vercel_api_url: String,
    history_store_url: Option<String>,
    history_store_token: Option<String>,
    upstash_redis_rest_url: Option<String>,
    upstash_redis_rest_token: Option<String>,
    pub history_key: String,
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub require_project_name: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::default())
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("vercel_api_url", DEFAULT_VERCEL_API_URL)?
            .set_default("history_key", DEFAULT_HISTORY_KEY)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
            .set_default("max_body_bytes", DEFAULT_MAX_BODY_BYTES)?
            .set_default("require_project_name", false)?
            .set_default("log_format", "text")?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn vercel_token(&self) -> Option<&str> {
        non_blank(&self.vercel_token)
    }

    pub fn vercel_team_id(&self) -> Option<&str> {
        non_blank(&self.vercel_team_id)
    }

    /// History store URL, falling back to the Upstash variable names.
    pub fn history_store_url(&self) -> Option<&str> {
        non_blank(&self.history_store_url).or_else(|| non_blank(&self.upstash_redis_rest_url))
    }

    pub fn history_store_token(&self) -> Option<&str> {
        non_blank(&self.history_store_token).or_else(|| non_blank(&self.upstash_redis_rest_token))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn project_name_policy(&self) -> ProjectNamePolicy {
        if self.require_project_name {
            ProjectNamePolicy::Required
        } else {
            ProjectNamePolicy::Optional
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> ServerConfig {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_env(Environment::default().source(Some(source))).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.vercel_token(), None);
        assert_eq!(config.vercel_api_url, DEFAULT_VERCEL_API_URL);
        assert_eq!(config.history_key, DEFAULT_HISTORY_KEY);
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert_eq!(config.max_body_bytes, 32 * 1024 * 1024);
        assert_eq!(config.project_name_policy(), ProjectNamePolicy::Optional);
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.history_store_url(), None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("VERCEL_TOKEN", "tok_123"),
            ("VERCEL_TEAM_ID", "team_9"),
            ("HISTORY_STORE_URL", "redis://127.0.0.1:6379"),
            ("REQUEST_TIMEOUT_SECS", "15"),
            ("REQUIRE_PROJECT_NAME", "true"),
            ("LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.vercel_token(), Some("tok_123"));
        assert_eq!(config.vercel_team_id(), Some("team_9"));
        assert_eq!(config.history_store_url(), Some("redis://127.0.0.1:6379"));
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.project_name_policy(), ProjectNamePolicy::Required);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_upstash_fallback_and_blank_values() {
        let config = load(&[
            ("VERCEL_TOKEN", "   "),
            ("UPSTASH_REDIS_REST_URL", "https://store.example"),
            ("UPSTASH_REDIS_REST_TOKEN", "kv_token"),
        ]);
        assert_eq!(config.vercel_token(), None);
        assert_eq!(config.history_store_url(), Some("https://store.example"));
        assert_eq!(config.history_store_token(), Some("kv_token"));
    }
}
