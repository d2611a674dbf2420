//! Loading listings from disk and small catalog-wide lookups.

use anyhow::Context;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::types::{Event, Item};

/// Queries shown under the search box before the user types anything.
pub const TRENDING_SEARCHES: [&str; 9] = [
    "iPhone",
    "Laptop",
    "Car",
    "House for rent",
    "Wedding dress",
    "Furniture",
    "Motorcycle",
    "Land for sale",
    "Tech conference",
];

/// Reads a JSON array of listings.
pub fn load_corpus(path: &Path) -> Result<Vec<Item>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
    let items: Vec<Item> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog at {}", path.display()))?;

    tracing::info!("Loaded {} listings from {}", items.len(), path.display());
    Ok(items)
}

/// Reads a JSON array of events and converts each into a listing.
pub fn load_events(path: &Path) -> Result<Vec<Item>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events at {}", path.display()))?;
    let events: Vec<Event> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse events at {}", path.display()))?;

    tracing::info!("Loaded {} events from {}", events.len(), path.display());
    Ok(events.into_iter().map(Item::from).collect())
}

/// Other listings in the same category, in corpus order.
pub fn related_items<'a, I>(corpus: I, item: &Item, limit: usize) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    corpus
        .into_iter()
        .filter(|other| other.id != item.id && other.category == item.category)
        .take(limit)
        .collect()
}

/// Distinct cities across the corpus, sorted. Blank locations are skipped.
pub fn cities<'a>(corpus: impl IntoIterator<Item = &'a Item>) -> Vec<String> {
    corpus
        .into_iter()
        .map(Item::city)
        .filter(|city| !city.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
