//! Document-frequency table and TF-IDF scoring over a fixed corpus.

use ahash::AHashMap;

use super::tokenize::{stem, tokenize_and_stem};
use crate::types::Item;

/// TF-IDF statistics for one corpus snapshot.
///
/// Built once and read-only afterwards; a changed corpus needs a new index.
#[derive(Debug, Clone, Default)]
pub struct RelevanceIndex {
    /// Map from stem to the number of distinct documents containing it
    document_frequency: AHashMap<String, usize>,
    /// Number of documents the index was built from
    total_documents: usize,
}

impl RelevanceIndex {
    /// Builds the document-frequency table from every listing's searchable text.
    pub fn new<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let start = std::time::Instant::now();
        let mut document_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut total_documents = 0;

        for item in items {
            total_documents += 1;
            let mut stems = tokenize_and_stem(&item.searchable_text());
            stems.sort_unstable();
            stems.dedup();
            for term in stems {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        tracing::debug!(
            "Built relevance index: {} unique stems, {} documents in {:?}",
            document_frequency.len(),
            total_documents,
            start.elapsed()
        );

        Self {
            document_frequency,
            total_documents,
        }
    }

    /// Scores a listing against query terms: sum of `tf × ln(N / df)`.
    ///
    /// Query terms are stemmed here, so raw tokens can be passed straight in.
    /// Terms never seen in the corpus use a document frequency of 1.
    pub fn score<S: AsRef<str>>(&self, item: &Item, query_terms: &[S]) -> f64 {
        let mut term_frequency: AHashMap<String, usize> = AHashMap::new();
        for term in tokenize_and_stem(&item.searchable_text()) {
            *term_frequency.entry(term).or_insert(0) += 1;
        }

        query_terms
            .iter()
            .map(|term| {
                let stemmed = stem(term.as_ref());
                let tf = term_frequency.get(stemmed).copied().unwrap_or(0);
                if tf == 0 {
                    return 0.0;
                }
                tf as f64 * self.idf(stemmed)
            })
            .sum()
    }

    /// Inverse document frequency `ln(N / df)` with a df floor of 1.
    ///
    /// An index over an empty corpus has no IDF signal and returns 0.
    pub fn idf(&self, stem: &str) -> f64 {
        if self.total_documents == 0 {
            return 0.0;
        }
        let df = self
            .document_frequency
            .get(stem)
            .copied()
            .unwrap_or(1)
            .max(1);
        (self.total_documents as f64 / df as f64).ln()
    }

    /// Number of distinct documents containing the stem.
    pub fn document_frequency(&self, stem: &str) -> usize {
        self.document_frequency.get(stem).copied().unwrap_or(0)
    }

    /// Get the number of unique stems in the index
    pub fn term_count(&self) -> usize {
        self.document_frequency.len()
    }

    /// Get the number of documents in the index
    pub fn document_count(&self) -> usize {
        self.total_documents
    }
}
