//! Book record data structure.

use serde::{Deserialize, Serialize};

/// Where a record's data came from.
///
/// Scraped records carry synthetic prices and ratings derived from the
/// extracted title, not verified facts. Sample records come from the
/// built-in fallback catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Scraped,
    Sample,
}

/// A single book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookRecord {
    /// Composite identifier, `"{category}-{n}"`, unique within a snapshot
    pub id: String,

    /// Book title (scraped heading text or sample title)
    pub title: String,

    /// Author name (generic placeholder for scraped records)
    pub author: String,

    /// Listed price, non-negative, two decimal places
    pub price: f64,

    /// Rating between 0.0 and 5.0, one decimal place
    pub rating: f64,

    /// Slug of the category this record belongs to
    pub category: String,

    /// Short blurb, when one is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the record was scraped live or taken from the fallback table
    pub provenance: Provenance,

    /// Label of the site the record is attributed to
    pub source: String,
}

impl BookRecord {
    /// True if the record came from a live scrape.
    pub fn is_scraped(&self) -> bool {
        self.provenance == Provenance::Scraped
    }
}
