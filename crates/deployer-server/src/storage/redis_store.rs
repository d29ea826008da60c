//! Redis-backed list store

use async_trait::async_trait;
use deployer_core::{DeployError, ListStore, Result};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use tokio::sync::OnceCell;

/// List store over a redis server.
///
/// The connection is opened on first use and shared afterwards, so a store
/// that is down at startup does not keep the server from booting.
pub struct RedisListStore {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisListStore {
    pub fn new(url: &str) -> std::result::Result<Self, RedisError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await
            .map_err(history_error)?;
        Ok(conn.clone())
    }
}

fn history_error(e: RedisError) -> DeployError {
    DeployError::History(e.to_string())
}

#[async_trait]
impl ListStore for RedisListStore {
    async fn push_front(&self, key: &str, value: String) -> Result<usize> {
        let mut conn = self.connection().await?;
        conn.lpush(key, value).await.map_err(history_error)
    }

    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<()> {
        let mut conn = self.connection().await?;
        conn.ltrim(key, start, stop).await.map_err(history_error)
    }

    async fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        conn.lrange(key, start, stop).await.map_err(history_error)
    }
}
