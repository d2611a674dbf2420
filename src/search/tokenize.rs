//! Text tokenization and stemming utilities for search indexing.

use ahash::AHashSet;

/// Minimum token length for indexing. Shorter tokens ("a", "x", "5") carry no signal.
const MIN_TOKEN_LENGTH: usize = 2;

/// Common English stop words to filter out from indexing.
/// These high-frequency words add little value to search relevance.
pub(crate) const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were",
];

/// Splits text into normalized search tokens.
///
/// The text is lower-cased, every character that is neither an ASCII word
/// character (`[a-z0-9_]`) nor whitespace becomes a separator, and tokens that
/// are too short or are stop words are dropped. Order is preserved and
/// duplicates are kept, so the output doubles as a term-frequency source.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|token| token.len() >= MIN_TOKEN_LENGTH && !STOP_WORDS.contains(token))
        .map(str::to_owned)
        .collect()
}

/// Strips a single common English suffix.
///
/// Rules are tried in order and only the first match fires:
/// `-ing`, `-ed`, `-er`, `-est`, `-ly`, then a plural `-s` on words longer
/// than three characters.
pub fn stem(word: &str) -> &str {
    for suffix in ["ing", "ed", "er", "est", "ly"] {
        if let Some(stripped) = word.strip_suffix(suffix) {
            return stripped;
        }
    }

    if word.chars().count() > 3
        && let Some(stripped) = word.strip_suffix('s')
    {
        return stripped;
    }

    word
}

/// Tokenizes and stems text, keeping duplicates (term-frequency order).
pub(crate) fn tokenize_and_stem(text: &str) -> Vec<String> {
    tokenize(text)
        .iter()
        .map(|token| stem(token).to_owned())
        .collect()
}

/// Distinct stems of a piece of text.
pub(crate) fn stem_set(text: &str) -> AHashSet<String> {
    tokenize_and_stem(text).into_iter().collect()
}
