// src/cache/mod.rs

//! In-memory catalog cache.
//!
//! The only state that survives between requests. A complete snapshot is
//! built per refresh cycle and committed with a single pointer swap:
//! readers clone an `Arc` under a briefly held read guard and then work
//! entirely on the immutable snapshot, so they can never observe a
//! half-written refresh.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::models::{BookRecord, Category};

/// The complete catalog as of one refresh cycle.
///
/// Invariant: every record in `books[slug]` has `category == slug`, and
/// `categories` holds exactly the slugs present in `books`, in the
/// configured order.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Categories in configured order
    pub categories: Vec<Category>,

    /// Book lists keyed by category slug, in extraction/fallback order
    pub books: HashMap<String, Vec<BookRecord>>,

    /// When this snapshot was assembled; None only for the boot snapshot
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// Total number of books across all categories.
    pub fn total_books(&self) -> usize {
        self.books.values().map(Vec::len).sum()
    }
}

/// Read-only projection of cache size, for status payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub categories: usize,
    pub total_books: usize,
}

/// Shared catalog store with copy-on-write snapshot replacement.
#[derive(Debug, Default)]
pub struct CatalogCache {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogCache {
    /// Create a cache holding an empty boot snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the current snapshot handle. The lock is held only for the
    /// `Arc` clone.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read().unwrap())
    }

    /// Atomically replace the entire snapshot.
    pub fn commit(&self, snapshot: CatalogSnapshot) {
        *self.current.write().unwrap() = Arc::new(snapshot);
    }

    /// Current category list.
    pub fn categories(&self) -> Vec<Category> {
        self.snapshot().categories.clone()
    }

    /// Books for one category, or every category's list concatenated in
    /// category-then-insertion order. Unknown slugs yield an empty vec.
    pub fn books(&self, slug: Option<&str>) -> Vec<BookRecord> {
        let snapshot = self.snapshot();
        match slug {
            Some(slug) => snapshot.books.get(slug).cloned().unwrap_or_default(),
            None => snapshot
                .categories
                .iter()
                .filter_map(|c| snapshot.books.get(&c.slug))
                .flatten()
                .cloned()
                .collect(),
        }
    }

    /// Look up a single book by id, scanning categories in order.
    /// First match wins.
    pub fn book(&self, id: &str) -> Option<BookRecord> {
        let snapshot = self.snapshot();
        snapshot
            .categories
            .iter()
            .filter_map(|c| snapshot.books.get(&c.slug))
            .flatten()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Timestamp of the last committed refresh; None before the first
    /// cycle completes.
    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot().refreshed_at
    }

    /// Category and book counts for the health payload.
    pub fn stats(&self) -> CacheStats {
        let snapshot = self.snapshot();
        CacheStats {
            categories: snapshot.categories.len(),
            total_books: snapshot.total_books(),
        }
    }
}
