//! Facet counts over a result set.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::types::Item;

/// One of the five fixed price bands shown in the price facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PriceBucket {
    #[serde(rename = "Under KSh 10,000")]
    Under10k,
    #[serde(rename = "KSh 10,000 - 50,000")]
    From10kTo50k,
    #[serde(rename = "KSh 50,000 - 100,000")]
    From50kTo100k,
    #[serde(rename = "KSh 100,000 - 500,000")]
    From100kTo500k,
    #[serde(rename = "Over KSh 500,000")]
    Over500k,
}

impl PriceBucket {
    pub const ALL: [Self; 5] = [
        Self::Under10k,
        Self::From10kTo50k,
        Self::From50kTo100k,
        Self::From100kTo500k,
        Self::Over500k,
    ];

    /// Band for a price; lower bounds are inclusive.
    pub fn for_price(price: f64) -> Self {
        if price < 10_000.0 {
            Self::Under10k
        } else if price < 50_000.0 {
            Self::From10kTo50k
        } else if price < 100_000.0 {
            Self::From50kTo100k
        } else if price < 500_000.0 {
            Self::From100kTo500k
        } else {
            Self::Over500k
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under10k => "Under KSh 10,000",
            Self::From10kTo50k => "KSh 10,000 - 50,000",
            Self::From50kTo100k => "KSh 50,000 - 100,000",
            Self::From100kTo500k => "KSh 100,000 - 500,000",
            Self::Over500k => "Over KSh 500,000",
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count breakdowns of a result set along each filterable dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub categories: BTreeMap<String, usize>,
    pub conditions: BTreeMap<String, usize>,
    /// Keyed by city, the part of the location before the first comma
    pub locations: BTreeMap<String, usize>,
    /// Always holds all five bands, zero or not
    pub price_ranges: BTreeMap<PriceBucket, usize>,
}

impl Default for Facets {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
            conditions: BTreeMap::new(),
            locations: BTreeMap::new(),
            price_ranges: PriceBucket::ALL.into_iter().map(|b| (b, 0)).collect(),
        }
    }
}

impl Facets {
    /// Tallies every dimension over the given listings.
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut facets = Self::default();
        for item in items {
            *facets.categories.entry(item.category.clone()).or_insert(0) += 1;
            *facets
                .conditions
                .entry(item.condition.as_str().to_string())
                .or_insert(0) += 1;
            *facets.locations.entry(item.city().to_string()).or_insert(0) += 1;
            *facets
                .price_ranges
                .entry(PriceBucket::for_price(item.price))
                .or_insert(0) += 1;
        }
        facets
    }

    /// Count for one price band.
    pub fn price_bucket(&self, bucket: PriceBucket) -> usize {
        self.price_ranges.get(&bucket).copied().unwrap_or(0)
    }
}

/// Per-category counts of the given listings.
pub(crate) fn category_breakdown<'a>(
    items: impl IntoIterator<Item = &'a Item>,
) -> BTreeMap<String, usize> {
    let mut categories = BTreeMap::new();
    for item in items {
        *categories.entry(item.category.clone()).or_insert(0) += 1;
    }
    categories
}
