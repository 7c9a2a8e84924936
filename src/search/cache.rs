//! Per-engine memo of search results.
//!
//! Keyed by (normalized query, field scope). Entries live until
//! [`ResultCache::clear`] or, when a capacity is set, until they are the
//! oldest entry and room is needed. Guarded by a mutex so a shared engine
//! can be searched from several threads.

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;

use super::types::{FieldScope, SearchResult};

/// Cache key: normalized query plus the scope it was matched against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    scope: FieldScope,
}

impl CacheKey {
    /// `query` must already be normalized.
    pub fn new(query: impl Into<String>, scope: FieldScope) -> Self {
        Self {
            query: query.into(),
            scope,
        }
    }
}

/// Insertion-ordered result cache with optional FIFO bound.
#[derive(Debug)]
pub struct ResultCache {
    entries: Mutex<IndexMap<CacheKey, Arc<Vec<SearchResult>>>>,
    capacity: Option<usize>,
}

impl ResultCache {
    /// `None` never evicts; `Some(0)` stores nothing.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
            capacity,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<Vec<SearchResult>>> {
        let hit = self.entries.lock().get(key).cloned();
        trace!(query = %key.query, hit = hit.is_some(), "result cache lookup");
        hit
    }

    pub fn insert(&self, key: CacheKey, results: Arc<Vec<SearchResult>>) {
        if self.capacity == Some(0) {
            return;
        }

        let mut entries = self.entries.lock();
        if let Some(capacity) = self.capacity {
            while entries.len() >= capacity && !entries.contains_key(&key) {
                if let Some((evicted, _)) = entries.shift_remove_index(0) {
                    trace!(query = %evicted.query, "result cache evicted oldest entry");
                }
            }
        }
        entries.insert(key, results);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
