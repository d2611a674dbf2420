//! Query suggestions and keystroke autocomplete.

use ahash::AHashSet;
use std::sync::Arc;

use super::scoring::edit_distance;
use super::tokenize::tokenize;
use crate::types::Item;

/// Maximum number of "did you mean" / related-term suggestions.
pub const MAX_SUGGESTIONS: usize = 6;

/// Maximum number of autocomplete candidates.
pub const MAX_AUTOCOMPLETE: usize = 8;

/// Queries shorter than this get no suggestions or completions.
const MIN_QUERY_CHARS: usize = 2;

/// Suggested terms must be longer than this.
const MIN_SUGGESTION_LEN: usize = 4;

/// Title tokens within this many edits of a query token are offered as corrections.
const MAX_CORRECTION_DISTANCE: usize = 2;

/// How many top results are mined for related terms.
const RELATED_SOURCE_RESULTS: usize = 10;

/// Insertion-ordered set of strings with a size cap.
struct Collector {
    seen: AHashSet<String>,
    ordered: Vec<String>,
    limit: usize,
}

impl Collector {
    fn new(limit: usize) -> Self {
        Self {
            seen: AHashSet::new(),
            ordered: Vec::new(),
            limit,
        }
    }

    fn push(&mut self, value: &str) {
        if self.is_full() || self.seen.contains(value) {
            return;
        }
        self.seen.insert(value.to_owned());
        self.ordered.push(value.to_owned());
    }

    fn is_full(&self) -> bool {
        self.ordered.len() >= self.limit
    }

    fn finish(self) -> Vec<String> {
        self.ordered
    }
}

/// Mines follow-up search terms for a query.
///
/// With no results, title tokens from the whole corpus that are within two
/// edits of a query token are offered as corrections. Otherwise the top
/// results' title and category tokens that the query does not already use are
/// offered as refinements.
pub(crate) fn mine_suggestions(
    search_term: &str,
    corpus: &[Arc<Item>],
    results: &[&Item],
) -> Vec<String> {
    if search_term.chars().count() < MIN_QUERY_CHARS {
        return vec![];
    }

    let query_tokens = tokenize(search_term);
    let mut collector = Collector::new(MAX_SUGGESTIONS);

    if results.is_empty() {
        'corpus: for item in corpus {
            for token in tokenize(&item.title) {
                if collector.is_full() {
                    break 'corpus;
                }
                let close = token.len() >= MIN_SUGGESTION_LEN
                    && query_tokens
                        .iter()
                        .any(|query| edit_distance(query, &token) <= MAX_CORRECTION_DISTANCE);
                if close {
                    collector.push(&token);
                }
            }
        }
    } else {
        for item in results.iter().take(RELATED_SOURCE_RESULTS) {
            let text = format!("{} {} {}", item.title, item.category, item.subcategory);
            for token in tokenize(&text) {
                if token.len() >= MIN_SUGGESTION_LEN && !query_tokens.contains(&token) {
                    collector.push(&token);
                }
            }
        }
    }

    collector.finish()
}

/// Completion candidates for a partially typed query.
///
/// Titles, categories, subcategories and seller names containing the query
/// (case-insensitive), in corpus order, deduplicated, capped at eight.
pub fn autocomplete(corpus: &[Arc<Item>], query: &str) -> Vec<String> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return vec![];
    }

    let needle = query.to_lowercase();
    let mut collector = Collector::new(MAX_AUTOCOMPLETE);

    for item in corpus {
        for field in [
            &item.title,
            &item.category,
            &item.subcategory,
            &item.seller.name,
        ] {
            if field.to_lowercase().contains(&needle) {
                collector.push(field);
            }
        }
        if collector.is_full() {
            break;
        }
    }

    collector.finish()
}
