//! Bounded deployment history ledger
//!
//! Entries are pushed to the head of a list in the external store and the list
//! is trimmed back to [`HISTORY_CAP`] after every write. The push and the trim
//! are separate store calls, so concurrent writers can briefly overshoot the
//! cap; every completed write restores it.

use crate::error::{DeployError, Result};
use crate::ports::ListStore;
use crate::types::HistoryEntry;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maximum number of entries kept in the ledger.
pub const HISTORY_CAP: usize = 50;

/// List key used when none is configured.
pub const DEFAULT_HISTORY_KEY: &str = "deploy_history";

const LAST_INDEX: isize = HISTORY_CAP as isize - 1;

#[derive(Clone)]
pub struct HistoryLedger {
    store: Arc<dyn ListStore>,
    key: String,
}

impl HistoryLedger {
    pub fn new(store: Arc<dyn ListStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Append an entry, logging instead of failing.
    ///
    /// History is a side channel: a store outage must never change the outcome
    /// of the deployment that produced the entry.
    pub async fn record(&self, entry: &HistoryEntry) {
        if let Err(e) = self.try_record(entry).await {
            warn!("Failed to write deploy history: {}", e);
        }
    }

    /// Push `entry` to the head of the list, then trim to the cap.
    pub async fn try_record(&self, entry: &HistoryEntry) -> Result<()> {
        let serialized =
            serde_json::to_string(entry).map_err(|e| DeployError::History(e.to_string()))?;

        self.store.push_front(&self.key, serialized).await?;
        self.store.trim(&self.key, 0, LAST_INDEX).await
    }

    /// Most recent entries, newest first. Undecodable entries are skipped.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>> {
        let raw = self.store.range(&self.key, 0, LAST_INDEX).await?;

        Ok(raw
            .iter()
            .filter_map(|item| match serde_json::from_str::<HistoryEntry>(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping undecodable history entry: {}", e);
                    None
                }
            })
            .collect())
    }
}
