//! History store adapters
//!
//! `redis://` / `rediss://` URLs speak the redis protocol, `http(s)://` URLs go
//! through an Upstash-style REST endpoint. Without a URL, history is kept in
//! process memory.

pub mod redis_store;
pub mod rest_store;

pub use redis_store::RedisListStore;
pub use rest_store::RestListStore;

use anyhow::{bail, Context, Result};
use deployer_core::{ListStore, MemoryListStore};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ServerConfig;

pub fn open_list_store(config: &ServerConfig) -> Result<Arc<dyn ListStore>> {
    let Some(url) = config.history_store_url() else {
        warn!("HISTORY_STORE_URL not set, deploy history is kept in memory only");
        return Ok(Arc::new(MemoryListStore::new()));
    };

    if url.starts_with("redis://") || url.starts_with("rediss://") {
        info!("Using redis history store");
        let store = RedisListStore::new(url).context("Invalid redis URL")?;
        return Ok(Arc::new(store));
    }

    if url.starts_with("https://") || url.starts_with("http://") {
        info!("Using REST history store at {}", url);
        let token = config
            .history_store_token()
            .context("HISTORY_STORE_TOKEN is required for a REST history store")?;
        return Ok(Arc::new(RestListStore::new(url.to_string(), token.to_string())));
    }

    bail!("Unsupported history store URL scheme: {}", url)
}
