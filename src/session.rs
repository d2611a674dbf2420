//! A stateful search session: current filters plus memoized results.

use chrono::{DateTime, NaiveDate, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use xxhash_rust::xxh3::xxh3_64;

use crate::search::{FilterState, FilterUpdate, QueryEngine, SearchResult};

/// Maximum number of distinct filter snapshots kept per session.
const RESULT_CACHE_SIZE: usize = 16;

/// One user's view onto a shared [`QueryEngine`].
///
/// Results are cached per filter snapshot and evaluation day, so re-rendering
/// the same page does not rescore the corpus. A changed corpus needs a new
/// engine and therefore a new session.
#[derive(Debug)]
pub struct SearchSession {
    engine: Arc<QueryEngine>,
    filters: FilterState,
    cache: LruCache<u64, Arc<SearchResult>>,
}

impl SearchSession {
    pub fn new(engine: Arc<QueryEngine>) -> Self {
        Self {
            engine,
            filters: FilterState::default(),
            cache: LruCache::new(NonZeroUsize::new(RESULT_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Merges a partial update into the current filters.
    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.filters.apply(update);
    }

    /// Resets every filter, including the search term, to its default.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Results for the current filters, evaluated now.
    pub fn search(&mut self) -> Arc<SearchResult> {
        self.search_at(Utc::now())
    }

    /// Results for the current filters at an explicit evaluation time.
    pub fn search_at(&mut self, now: DateTime<Utc>) -> Arc<SearchResult> {
        let Some(key) = fingerprint(&self.filters, now.date_naive()) else {
            return Arc::new(self.engine.search_at(&self.filters, now));
        };

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Result cache hit for '{}'", self.filters.search_term);
            return Arc::clone(cached);
        }

        let result = Arc::new(self.engine.search_at(&self.filters, now));
        self.cache.put(key, Arc::clone(&result));
        result
    }

    /// Autocomplete candidates for a partially typed query.
    pub fn suggest(&self, query: &str) -> Vec<String> {
        self.engine.suggest(query)
    }

    /// Number of cached result sets.
    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }
}

/// Hash of the serialized filter snapshot combined with the evaluation day.
fn fingerprint(filters: &FilterState, day: NaiveDate) -> Option<u64> {
    let mut bytes = match serde_json::to_vec(filters) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Skipping result cache, filters did not serialize: {}", e);
            return None;
        }
    };
    bytes.extend_from_slice(day.to_string().as_bytes());
    Some(xxh3_64(&bytes))
}
