//! Full-text search infrastructure for marketplace listings.
//!
//! This module provides TF-IDF based relevance ranking over an in-memory
//! corpus, including tokenization, stemming, scoring, structured filtering,
//! facets, suggestions and autocomplete.

// Module declarations
pub mod facets;
pub mod filters;
pub(crate) mod index;
pub(crate) mod query;
pub(crate) mod scoring;
pub(crate) mod suggest;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use facets::{Facets, PriceBucket};
pub use filters::{Choice, DateRange, FilterState, FilterUpdate, PriceRange, SortBy};
pub use index::RelevanceIndex;
pub use query::{BROWSE_LIMIT, QueryEngine, RankedItem, SearchResult, age_in_days};
pub use scoring::{edit_distance, jaccard_similarity};
pub use suggest::{MAX_AUTOCOMPLETE, MAX_SUGGESTIONS, autocomplete};
pub use tokenize::{stem, tokenize};
