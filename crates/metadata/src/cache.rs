//! Query-keyed response cache.
//!
//! Entries are bounded by count (oldest settled entry evicted first) and by
//! age. Each entry is a once-cell, so concurrent callers asking for the same
//! query share a single upstream fetch. Failed fetches leave nothing behind.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::RawRecord;
use crate::provider::Query;

#[derive(Debug, Clone)]
pub struct CachePolicy {
    pub capacity: usize,
    pub ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            capacity: 512,
            ttl: Duration::from_secs(60 * 60),
        }
    }
}

struct Entry {
    cell: Arc<OnceCell<RawRecord>>,
    inserted: Instant,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<Query, Entry>,
    // Insertion order; holds exactly the keys of `entries`.
    order: VecDeque<Query>,
}

impl CacheInner {
    fn insert(&mut self, query: &Query, cell: Arc<OnceCell<RawRecord>>) {
        let replaced = self.entries.insert(
            query.clone(),
            Entry {
                cell,
                inserted: Instant::now(),
            },
        );
        if replaced.is_some() {
            self.order.retain(|q| q != query);
        }
        self.order.push_back(query.clone());
    }

    fn remove(&mut self, query: &Query) {
        if self.entries.remove(query).is_some() {
            self.order.retain(|q| q != query);
        }
    }

    /// Drop the oldest settled entries until `capacity` holds. Entries whose
    /// fetch is still running are skipped.
    fn evict(&mut self, capacity: usize) {
        while self.entries.len() > capacity {
            let entries = &self.entries;
            let Some(pos) = self
                .order
                .iter()
                .position(|q| entries.get(q).is_some_and(|e| e.cell.initialized()))
            else {
                break;
            };
            if let Some(old) = self.order.remove(pos) {
                self.entries.remove(&old);
                debug!(query = ?old, "cache entry evicted");
            }
        }
    }
}

pub struct QueryCache {
    policy: CachePolicy,
    inner: Mutex<CacheInner>,
}

impl QueryCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// Return the cached record for `query`, or run `fetch` once and cache a
    /// `Some` result. `None` results are not cached.
    pub async fn get_or_fetch<F, Fut>(&self, query: &Query, fetch: F) -> Option<RawRecord>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<RawRecord>>,
    {
        let cell = self.cell_for(query).await;

        if let Some(hit) = cell.get() {
            debug!(?query, "cache hit");
            return Some(hit.clone());
        }

        let result = cell
            .get_or_try_init(|| async { fetch().await.ok_or(()) })
            .await;

        match result {
            Ok(record) => {
                let record = record.clone();
                self.inner.lock().await.evict(self.policy.capacity.max(1));
                Some(record)
            }
            Err(()) => {
                self.forget_empty(query, &cell).await;
                None
            }
        }
    }

    /// Number of live entries, including in-flight ones.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn cell_for(&self, query: &Query) -> Arc<OnceCell<RawRecord>> {
        let mut inner = self.inner.lock().await;

        if let Some(entry) = inner.entries.get(query) {
            if entry.inserted.elapsed() < self.policy.ttl {
                return entry.cell.clone();
            }
            debug!(?query, "cache entry expired");
        }

        let cell = Arc::new(OnceCell::new());
        inner.insert(query, cell.clone());
        inner.evict(self.policy.capacity.max(1));
        cell
    }

    async fn forget_empty(&self, query: &Query, cell: &Arc<OnceCell<RawRecord>>) {
        let mut inner = self.inner.lock().await;
        let same_empty = inner
            .entries
            .get(query)
            .is_some_and(|e| Arc::ptr_eq(&e.cell, cell) && !e.cell.initialized());
        if same_empty {
            inner.remove(query);
        }
    }
}
