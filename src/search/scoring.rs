//! Search relevance and ranking algorithms.
//!
//! This module provides the similarity primitives (edit distance, Jaccard) and
//! the composite relevance formula used to rank listings against a query.

use ahash::AHashSet;
use std::hash::Hash;

use super::tokenize::{stem_set, tokenize};
use crate::types::Item;

const TFIDF_WEIGHT: f64 = 0.30;
const EXACT_MATCH_WEIGHT: f64 = 0.25;
const FIELD_WEIGHT: f64 = 0.20;
const FUZZY_WEIGHT: f64 = 0.10;
const QUALITY_WEIGHT: f64 = 0.15;

/// Points awarded (before weighting) when the raw query appears verbatim.
const EXACT_MATCH_POINTS: f64 = 100.0;

/// Field multipliers for Jaccard similarity against title, description and category.
const TITLE_FIELD: f64 = 80.0;
const DESCRIPTION_FIELD: f64 = 40.0;
const CATEGORY_FIELD: f64 = 60.0;

/// A title word must be at least this similar to a query term to count as a typo match.
const FUZZY_THRESHOLD: f64 = 0.7;
const FUZZY_POINTS: f64 = 30.0;

/// Levenshtein distance between two strings, counted in Unicode scalar values.
///
/// Classic dynamic programme over a `(|b| + 1) × (|a| + 1)` table with unit
/// cost for insertion, deletion and substitution.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut matrix = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, cell) in matrix[0].iter_mut().enumerate() {
        *cell = i;
    }
    for (j, row) in matrix.iter_mut().enumerate() {
        row[0] = j;
    }

    for j in 1..=b.len() {
        for i in 1..=a.len() {
            let substitution = usize::from(a[i - 1] != b[j - 1]);
            matrix[j][i] = (matrix[j][i - 1] + 1)
                .min(matrix[j - 1][i] + 1)
                .min(matrix[j - 1][i - 1] + substitution);
        }
    }

    matrix[b.len()][a.len()]
}

/// Normalized similarity in `[0, 1]` derived from edit distance.
pub(crate) fn edit_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / longest as f64
}

/// Intersection over union of two sets; 0 when both are empty.
pub fn jaccard_similarity<T: Eq + Hash>(a: &AHashSet<T>, b: &AHashSet<T>) -> f64 {
    let intersection = a.iter().filter(|x| b.contains(*x)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// A query prepared once and scored against every listing.
#[derive(Debug, Clone)]
pub(crate) struct PreparedQuery {
    /// The query exactly as typed, lower-cased, for substring matching
    pub(crate) raw_lower: String,
    /// Tokens before stemming, used for TF-IDF and fuzzy matching
    pub(crate) terms: Vec<String>,
    /// Distinct stems of the query
    pub(crate) stems: AHashSet<String>,
}

impl PreparedQuery {
    pub(crate) fn new(query: &str) -> Self {
        Self {
            raw_lower: query.to_lowercase(),
            terms: tokenize(query),
            stems: stem_set(query),
        }
    }
}

/// Exact-match component: the whole query inside "title description".
pub(crate) fn exact_match_score(item: &Item, query: &PreparedQuery) -> f64 {
    if query.raw_lower.is_empty() {
        return 0.0;
    }
    let text = format!("{} {}", item.title, item.description).to_lowercase();
    if text.contains(&query.raw_lower) {
        EXACT_MATCH_POINTS
    } else {
        0.0
    }
}

/// Field-weighted Jaccard similarity between query stems and listing fields.
pub(crate) fn field_score(item: &Item, query: &PreparedQuery) -> f64 {
    let title = stem_set(&item.title);
    let description = stem_set(&item.description);
    let category = stem_set(&format!("{} {}", item.category, item.subcategory));

    jaccard_similarity(&query.stems, &title) * TITLE_FIELD
        + jaccard_similarity(&query.stems, &description) * DESCRIPTION_FIELD
        + jaccard_similarity(&query.stems, &category) * CATEGORY_FIELD
}

/// Typo-tolerant title matching, summed over query terms.
pub(crate) fn fuzzy_score(item: &Item, query: &PreparedQuery) -> f64 {
    let title_words = tokenize(&item.title);
    query
        .terms
        .iter()
        .map(|term| {
            title_words
                .iter()
                .map(|word| edit_similarity(term, word))
                .fold(0.0, f64::max)
        })
        .filter(|best| *best > FUZZY_THRESHOLD)
        .map(|best| best * FUZZY_POINTS)
        .sum()
}

/// Seller trust and merchandising flags.
pub(crate) fn quality_score(item: &Item) -> f64 {
    let mut score = 0.0;
    if item.seller.verified {
        score += 15.0;
    }
    if item.is_hot_deal {
        score += 20.0;
    }
    if item.featured {
        score += 10.0;
    }
    if item.images.len() > 1 {
        score += 5.0;
    }
    score
}

/// Freshness bonus from listing age in whole days. Added outside the weighted budget.
pub(crate) const fn recency_boost(age_days: i64) -> f64 {
    if age_days <= 1 {
        10.0
    } else if age_days <= 7 {
        5.0
    } else if age_days <= 30 {
        2.0
    } else {
        0.0
    }
}

/// Combines every signal into the single relevance score of a listing.
pub(crate) fn relevance_score(item: &Item, query: &PreparedQuery, tfidf: f64, age_days: i64) -> f64 {
    tfidf * TFIDF_WEIGHT
        + exact_match_score(item, query) * EXACT_MATCH_WEIGHT
        + field_score(item, query) * FIELD_WEIGHT
        + fuzzy_score(item, query) * FUZZY_WEIGHT
        + quality_score(item) * QUALITY_WEIGHT
        + recency_boost(age_days)
}
