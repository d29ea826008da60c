//! In-memory list store using DashMap (stands in for redis when no store is configured)

use crate::ports::ListStore;
use crate::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::ops::Range;
use std::sync::Arc;

/// Process-local list store. Contents are lost on restart.
#[derive(Clone, Default)]
pub struct MemoryListStore {
    data: Arc<DashMap<String, VecDeque<String>>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current length of a list
    pub fn len(&self, key: &str) -> usize {
        self.data.get(key).map(|list| list.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, key: &str) -> bool {
        self.len(key) == 0
    }
}

/// Map redis-style inclusive, possibly negative indexes onto a slice range.
fn resolve_range(len: usize, start: isize, stop: isize) -> Option<Range<usize>> {
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };

    if start > stop || start >= len {
        return None;
    }
    Some(start as usize..stop as usize + 1)
}

#[async_trait]
impl ListStore for MemoryListStore {
    async fn push_front(&self, key: &str, value: String) -> Result<usize> {
        let mut list = self.data.entry(key.to_string()).or_default();
        list.push_front(value);
        Ok(list.len())
    }

    async fn trim(&self, key: &str, start: isize, stop: isize) -> Result<()> {
        let emptied = match self.data.get_mut(key) {
            Some(mut list) => match resolve_range(list.len(), start, stop) {
                Some(range) => {
                    list.truncate(range.end);
                    list.drain(..range.start);
                    false
                }
                None => true,
            },
            None => false,
        };

        // Redis drops a list once it has no elements left.
        if emptied {
            self.data.remove(key);
        }
        Ok(())
    }

    async fn range(&self, key: &str, start: isize, stop: isize) -> Result<Vec<String>> {
        let Some(list) = self.data.get(key) else {
            return Ok(Vec::new());
        };
        Ok(match resolve_range(list.len(), start, stop) {
            Some(range) => list.range(range).cloned().collect(),
            None => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_range() {
        assert_eq!(resolve_range(0, 0, 49), None);
        assert_eq!(resolve_range(10, 0, 49), Some(0..10));
        assert_eq!(resolve_range(10, 0, -1), Some(0..10));
        assert_eq!(resolve_range(10, -3, -1), Some(7..10));
        assert_eq!(resolve_range(10, 5, 2), None);
        assert_eq!(resolve_range(10, 12, 20), None);
        assert_eq!(resolve_range(10, -20, 1), Some(0..2));
    }

    #[tokio::test]
    async fn test_basic_operations() {
        let store = MemoryListStore::new();

        assert_eq!(store.push_front("list", "a".to_string()).await.unwrap(), 1);
        assert_eq!(store.push_front("list", "b".to_string()).await.unwrap(), 2);
        store.push_front("list", "c".to_string()).await.unwrap();

        // Newest first
        assert_eq!(store.range("list", 0, -1).await.unwrap(), vec!["c", "b", "a"]);
        assert_eq!(store.range("list", 1, 1).await.unwrap(), vec!["b"]);

        // Missing list
        assert!(store.range("nonexistent", 0, 49).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trim() {
        let store = MemoryListStore::new();
        for i in 0..5 {
            store.push_front("list", i.to_string()).await.unwrap();
        }

        store.trim("list", 0, 2).await.unwrap();
        assert_eq!(store.range("list", 0, -1).await.unwrap(), vec!["4", "3", "2"]);

        store.trim("list", 1, -1).await.unwrap();
        assert_eq!(store.range("list", 0, -1).await.unwrap(), vec!["3", "2"]);

        store.trim("list", 5, 10).await.unwrap();
        assert!(store.is_empty("list"));

        // Trimming a missing list is a no-op
        store.trim("nonexistent", 0, 49).await.unwrap();
    }
}
