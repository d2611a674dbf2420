//! The query engine: scoring, filtering, sorting and result assembly.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::facets::{Facets, category_breakdown};
use super::filters::{FilterState, SortBy};
use super::index::RelevanceIndex;
use super::scoring::{PreparedQuery, relevance_score};
use super::suggest::{autocomplete, mine_suggestions};
use crate::types::Item;

/// How many recent listings the browse view shows.
pub const BROWSE_LIMIT: usize = 20;

/// Listings scoring below this are dropped whenever a query is present.
const RELEVANCE_FLOOR: f64 = 1.0;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// A listing paired with the relevance score it earned for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: Arc<Item>,
    pub relevance_score: f64,
}

/// Everything the results page needs for one filter snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub products: Vec<RankedItem>,
    pub total_count: usize,
    /// Serialized as whole milliseconds
    #[serde(serialize_with = "serialize_millis")]
    pub search_time: Duration,
    pub suggestions: Vec<String>,
    pub categories: BTreeMap<String, usize>,
    pub facets: Facets,
}

impl SearchResult {
    /// Listings in result order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.products.iter().map(|ranked| ranked.item.as_ref())
    }

    /// Listing ids in result order.
    pub fn ids(&self) -> Vec<&str> {
        self.items().map(|item| item.id.as_str()).collect()
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Whole days between a listing date (midnight UTC) and the evaluation time, rounded down.
pub fn age_in_days(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let listed = date.and_time(NaiveTime::MIN).and_utc();
    (now - listed).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Search over one fixed corpus.
///
/// The engine owns the corpus and its [`RelevanceIndex`]; both are immutable,
/// so a single engine can serve concurrent searches from many threads.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    items: Vec<Arc<Item>>,
    index: RelevanceIndex,
}

impl QueryEngine {
    /// Takes ownership of a corpus and builds its relevance index.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        let items: Vec<Arc<Item>> = items.into_iter().map(Arc::new).collect();
        let index = RelevanceIndex::new(items.iter().map(AsRef::as_ref));
        Self { items, index }
    }

    /// The corpus in its original order.
    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn index(&self) -> &RelevanceIndex {
        &self.index
    }

    /// Runs the full pipeline against the current time.
    pub fn search(&self, filters: &FilterState) -> SearchResult {
        self.search_at(filters, Utc::now())
    }

    /// Runs the full pipeline with an explicit evaluation time.
    ///
    /// Recency boosts and the date-range filter measure listing age against `now`.
    pub fn search_at(&self, filters: &FilterState, now: DateTime<Utc>) -> SearchResult {
        if filters.is_browse() {
            return self.browse();
        }

        let start = Instant::now();
        let query = PreparedQuery::new(&filters.search_term);
        let has_term = !filters.search_term.is_empty();

        let mut ranked: Vec<RankedItem> = self
            .items
            .iter()
            .filter_map(|item| {
                let age_days = age_in_days(item.date_added, now);
                let tfidf = self.index.score(item, query.terms.as_slice());
                let score = relevance_score(item, &query, tfidf, age_days);

                let relevant = !has_term || score >= RELEVANCE_FLOOR;
                (relevant && filters.admits(item, age_days)).then(|| RankedItem {
                    item: Arc::clone(item),
                    relevance_score: score,
                })
            })
            .collect();

        sort_results(&mut ranked, filters.sort_by);

        let matched: Vec<&Item> = ranked.iter().map(|r| r.item.as_ref()).collect();
        let suggestions = mine_suggestions(&filters.search_term, &self.items, &matched);
        let categories = category_breakdown(matched.iter().copied());
        let facets = Facets::tally(matched.iter().copied());
        let search_time = start.elapsed();

        tracing::debug!(
            "Search '{}' matched {} of {} listings in {:?}",
            filters.search_term,
            ranked.len(),
            self.items.len(),
            search_time
        );

        SearchResult {
            total_count: ranked.len(),
            products: ranked,
            search_time,
            suggestions,
            categories,
            facets,
        }
    }

    /// Browse view: the newest listings, unscored.
    fn browse(&self) -> SearchResult {
        let mut recent: Vec<&Arc<Item>> = self.items.iter().collect();
        recent.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        recent.truncate(BROWSE_LIMIT);

        let products: Vec<RankedItem> = recent
            .into_iter()
            .map(|item| RankedItem {
                item: Arc::clone(item),
                relevance_score: 0.0,
            })
            .collect();
        let facets = Facets::tally(products.iter().map(|r| r.item.as_ref()));

        SearchResult {
            products,
            total_count: self.items.len(),
            search_time: Duration::ZERO,
            suggestions: vec![],
            categories: BTreeMap::new(),
            facets,
        }
    }

    /// Autocomplete candidates for a partially typed query.
    pub fn suggest(&self, query: &str) -> Vec<String> {
        autocomplete(&self.items, query)
    }
}

/// Orders results in place by a single key; ties keep their corpus order.
fn sort_results(results: &mut [RankedItem], sort_by: SortBy) {
    let compare: fn(&RankedItem, &RankedItem) -> Ordering = match sort_by {
        SortBy::Relevance => |a, b| b.relevance_score.total_cmp(&a.relevance_score),
        SortBy::PriceLow => |a, b| a.item.price.total_cmp(&b.item.price),
        SortBy::PriceHigh => |a, b| b.item.price.total_cmp(&a.item.price),
        SortBy::Newest => |a, b| b.item.date_added.cmp(&a.item.date_added),
        SortBy::Oldest => |a, b| a.item.date_added.cmp(&b.item.date_added),
        SortBy::Alphabetical => |a, b| {
            a.item
                .title
                .to_lowercase()
                .cmp(&b.item.title.to_lowercase())
                .then_with(|| a.item.title.cmp(&b.item.title))
        },
        SortBy::Discount => |a, b| b.item.discount().total_cmp(&a.item.discount()),
        SortBy::Popularity => |a, b| b.item.popularity().cmp(&a.item.popularity()),
        SortBy::Unrecognized => return,
    };
    results.sort_by(compare);
}
