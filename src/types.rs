//! Catalog records: listings, sellers and events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical condition of a listed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact details and trust flag for whoever lists an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub verified: bool,
}

/// A searchable marketplace listing.
///
/// Field names serialize in camelCase (`originalPrice`, `isHotDeal`,
/// `dateAdded`) so catalog exports from the storefront load as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub condition: Condition,
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
    /// Free text, conventionally "City, Country".
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub seller: Seller,
    #[serde(default)]
    pub is_hot_deal: bool,
    #[serde(default)]
    pub featured: bool,
    pub date_added: NaiveDate,
}

impl Item {
    /// Text indexed for TF-IDF: title, description, category and subcategory.
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title, self.description, self.category, self.subcategory
        )
    }

    /// City portion of the location (text before the first comma).
    pub fn city(&self) -> &str {
        self.location.split(',').next().unwrap_or_default().trim()
    }

    /// Fractional discount off the original price, 0 when there is none.
    pub fn discount(&self) -> f64 {
        match self.original_price {
            Some(original) if original != 0.0 => (original - self.price) / original,
            _ => 0.0,
        }
    }

    /// Popularity composite used by the popularity sort.
    ///
    /// Deliberately a separate scale from the quality signals in relevance scoring.
    pub fn popularity(&self) -> u32 {
        let mut popularity = 0;
        if self.seller.verified {
            popularity += 10;
        }
        if self.is_hot_deal {
            popularity += 15;
        }
        if self.featured {
            popularity += 8;
        }
        popularity
    }
}

/// A ticketed event as published by an organizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub location: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub organizer: Seller,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<Event> for Item {
    fn from(event: Event) -> Self {
        let subcategory = event.tags.into_iter().next().unwrap_or_default();
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            price: event.price,
            original_price: event.original_price,
            condition: Condition::New,
            category: event.category,
            subcategory,
            location: event.location,
            images: event.images,
            seller: event.organizer,
            is_hot_deal: false,
            featured: event.featured,
            date_added: event.date,
        }
    }
}
