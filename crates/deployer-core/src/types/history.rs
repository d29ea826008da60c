//! Deployment history types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successful deployment, as stored in the history ledger.
///
/// `time` is stored as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub project_name: String,
    pub url: Option<String>,
    pub file_count: usize,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(project_name: String, url: Option<String>, file_count: usize) -> Self {
        Self {
            project_name,
            url,
            file_count,
            time: Utc::now(),
        }
    }
}
