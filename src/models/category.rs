//! Category data structure.

use serde::{Deserialize, Serialize};

/// A browsable catalog category.
///
/// Built by the refresh pipeline from the configured category list; the
/// count is derived from the refreshed book list, never hardcoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// URL-safe identifier (e.g. "fiction")
    pub slug: String,

    /// Human-readable display name
    pub name: String,

    /// Decorative icon shown next to the name
    pub icon: String,

    /// Number of books in this category's current list
    pub count: usize,
}
