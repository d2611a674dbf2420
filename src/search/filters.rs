//! Filter state: the structured half of a search request.
//!
//! A [`FilterState`] is a plain value. Hosts mutate their own copy through
//! [`FilterState::apply`] and [`FilterState::clear`]; the query engine only
//! ever reads it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Item;

/// Upper bound of the default price range, in local currency units.
pub const DEFAULT_MAX_PRICE: f64 = 5_000_000.0;

const ALL: &str = "all";

/// A categorical filter: either everything or one specific value.
///
/// Serializes as the bare string, with `"all"` meaning no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Choice {
    #[default]
    All,
    Only(String),
}

impl Choice {
    pub fn only(value: impl Into<String>) -> Self {
        Self::from(value.into())
    }

    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Exact string match, `All` passes everything.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Case-insensitive substring match, `All` passes everything.
    pub fn contained_in(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => value.to_lowercase().contains(&wanted.to_lowercase()),
        }
    }
}

impl From<String> for Choice {
    fn from(value: String) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<Choice> for String {
    fn from(choice: Choice) -> Self {
        match choice {
            Choice::All => ALL.to_string(),
            Choice::Only(value) => value,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => f.write_str(value),
        }
    }
}

/// Inclusive price bounds. Serializes as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether the price lies within the bounds. An inverted range admits nothing.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_MAX_PRICE)
    }
}

impl From<(f64, f64)> for PriceRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<PriceRange> for (f64, f64) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

/// Result ordering. Unknown names deserialize to `Unrecognized`, which leaves order untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Newest,
    Oldest,
    Alphabetical,
    Discount,
    Popularity,
    #[serde(other)]
    Unrecognized,
}

impl SortBy {
    /// Parses a sort name, mapping anything unknown to `Unrecognized`.
    pub fn parse(name: &str) -> Self {
        match name {
            "relevance" => Self::Relevance,
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "alphabetical" => Self::Alphabetical,
            "discount" => Self::Discount,
            "popularity" => Self::Popularity,
            _ => Self::Unrecognized,
        }
    }
}

/// Listing-age window. Unknown names deserialize to `Unrecognized`, which admits everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    #[serde(other)]
    Unrecognized,
}

impl DateRange {
    pub fn parse(name: &str) -> Self {
        match name {
            "all" => Self::All,
            "today" => Self::Today,
            "week" => Self::Week,
            "month" => Self::Month,
            _ => Self::Unrecognized,
        }
    }

    /// Whether a listing of the given age (whole days) falls inside the window.
    pub const fn admits(self, age_days: i64) -> bool {
        match self {
            Self::Today => age_days <= 1,
            Self::Week => age_days <= 7,
            Self::Month => age_days <= 30,
            Self::All | Self::Unrecognized => true,
        }
    }
}

/// Everything a user can narrow a search by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_term: String,
    pub category: Choice,
    pub subcategory: Choice,
    pub condition: Choice,
    pub location: Choice,
    pub price_range: PriceRange,
    pub sort_by: SortBy,
    pub is_hot_deal: bool,
    pub is_featured: bool,
    pub verified_sellers_only: bool,
    pub date_range: DateRange,
}

impl FilterState {
    /// Filter state with only a free-text query set.
    pub fn with_term(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    /// Merges a partial update; fields left as `None` keep their current value.
    pub fn apply(&mut self, update: FilterUpdate) {
        let FilterUpdate {
            search_term,
            category,
            subcategory,
            condition,
            location,
            price_range,
            sort_by,
            is_hot_deal,
            is_featured,
            verified_sellers_only,
            date_range,
        } = update;

        if let Some(value) = search_term {
            self.search_term = value;
        }
        if let Some(value) = category {
            self.category = value;
        }
        if let Some(value) = subcategory {
            self.subcategory = value;
        }
        if let Some(value) = condition {
            self.condition = value;
        }
        if let Some(value) = location {
            self.location = value;
        }
        if let Some(value) = price_range {
            self.price_range = value;
        }
        if let Some(value) = sort_by {
            self.sort_by = value;
        }
        if let Some(value) = is_hot_deal {
            self.is_hot_deal = value;
        }
        if let Some(value) = is_featured {
            self.is_featured = value;
        }
        if let Some(value) = verified_sellers_only {
            self.verified_sellers_only = value;
        }
        if let Some(value) = date_range {
            self.date_range = value;
        }
    }

    /// Resets every field to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when nothing narrows the corpus and the order is the default one,
    /// i.e. the user is just browsing.
    pub fn is_browse(&self) -> bool {
        self.search_term.is_empty()
            && self.category.is_all()
            && self.subcategory.is_all()
            && self.condition.is_all()
            && self.location.is_all()
            && self.price_range == PriceRange::default()
            && self.sort_by == SortBy::Relevance
            && !self.is_hot_deal
            && !self.is_featured
            && !self.verified_sellers_only
            && matches!(self.date_range, DateRange::All)
    }

    /// Every structured predicate (not the relevance floor) against one listing.
    pub fn admits(&self, item: &Item, age_days: i64) -> bool {
        self.category.matches(&item.category)
            && self.subcategory.matches(&item.subcategory)
            && self.condition.matches(item.condition.as_str())
            && self.location.contained_in(&item.location)
            && self.price_range.contains(item.price)
            && (!self.is_hot_deal || item.is_hot_deal)
            && (!self.is_featured || item.featured)
            && (!self.verified_sellers_only || item.seller.verified)
            && self.date_range.admits(age_days)
    }
}

/// A partial [`FilterState`]; `None` fields are left unchanged when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterUpdate {
    pub search_term: Option<String>,
    pub category: Option<Choice>,
    pub subcategory: Option<Choice>,
    pub condition: Option<Choice>,
    pub location: Option<Choice>,
    pub price_range: Option<PriceRange>,
    pub sort_by: Option<SortBy>,
    pub is_hot_deal: Option<bool>,
    pub is_featured: Option<bool>,
    pub verified_sellers_only: Option<bool>,
    pub date_range: Option<DateRange>,
}
