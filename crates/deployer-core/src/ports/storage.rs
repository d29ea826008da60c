//! Bounded-list store port

use crate::Result;
use async_trait::async_trait;

/// A named list of opaque string entries.
///
/// Indexes follow redis list semantics: `stop` is inclusive and negative
/// values count from the tail (`-1` is the last element).
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Insert `value` at the head of the list, returning the new length.
    async fn push_front(&self, key: &str, value: String) -> Result<usize>;

    /// Keep only the elements in `start..=stop`.
    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<()>;

    /// Read the elements in `start..=stop`. A missing list reads as empty.
    async fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>>;
}
