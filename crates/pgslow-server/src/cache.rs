//! Response cache for slow query listings.
//!
//! Entries are keyed by the [`ResolvedQuery`], not the raw query string, so
//! `?order_by=DESC` and no parameters share an entry while any two distinct
//! pages never collide. Only successful results are stored.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use pgslow_core::{ResolvedQuery, SlowQueryLog};

/// Cached page of slow query logs.
pub type CachedPage = Arc<Vec<SlowQueryLog>>;

/// TTL-bounded cache; a zero TTL disables it.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Option<Cache<ResolvedQuery, CachedPage>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        if ttl.is_zero() || max_entries == 0 {
            return Self::disabled();
        }

        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { inner: Some(cache) }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub async fn get(&self, key: &ResolvedQuery) -> Option<CachedPage> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    pub async fn insert(&self, key: ResolvedQuery, page: CachedPage) {
        if let Some(cache) = &self.inner {
            cache.insert(key, page).await;
        }
    }
}
