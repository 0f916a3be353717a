// src/services/extractor.rs

//! Heading-based title extraction.
//!
//! A best-effort signal source, not a contract with the remote site's
//! markup: category pages are scanned for h2–h4 headings whose stripped
//! text looks like a plausible book title. Prices and ratings on the
//! resulting records are synthetic placeholders derived from the title,
//! never data read from the page.

use std::sync::OnceLock;

use scraper::{Html, Selector};
use sha2::{Digest, Sha256};

use crate::models::{BookRecord, Provenance};

/// Maximum records produced per page, bounding cost and list size.
pub const MAX_BOOKS_PER_PAGE: usize = 5;

/// Titles must be strictly longer than this many characters.
pub const MIN_TITLE_CHARS: usize = 10;

/// Titles must be strictly shorter than this many characters.
pub const MAX_TITLE_CHARS: usize = 100;

static HEADING_SELECTOR: OnceLock<Selector> = OnceLock::new();

fn heading_selector() -> &'static Selector {
    HEADING_SELECTOR.get_or_init(|| Selector::parse("h2, h3, h4").expect("static selector"))
}

/// Extract candidate book records from raw category-page markup.
///
/// Headings are taken in document order, nested tags stripped from the
/// inner text, and accepted only when the title length falls in the open
/// interval (10, 100). Returns an empty vec on empty input or when
/// nothing qualifies; the caller's fallback policy handles that case.
pub fn extract_books(raw: &str, slug: &str, source: &str) -> Vec<BookRecord> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let document = Html::parse_document(raw);
    let mut books = Vec::new();

    for heading in document.select(heading_selector()) {
        let text: String = heading.text().collect();
        let title = normalize_whitespace(&text);
        let len = title.chars().count();
        if len <= MIN_TITLE_CHARS || len >= MAX_TITLE_CHARS {
            continue;
        }

        let (price, rating) = synth_metrics(&title);
        books.push(BookRecord {
            id: format!("{}-{}", slug, books.len() + 1),
            description: Some(format!("\"{}\" is available on World of Books.", title)),
            title,
            author: "Various Authors".to_string(),
            price,
            rating,
            category: slug.to_string(),
            provenance: Provenance::Scraped,
            source: source.to_string(),
        });

        if books.len() >= MAX_BOOKS_PER_PAGE {
            break;
        }
    }

    books
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive a placeholder price in [8, 33) and rating in [3.8, 5.0) from
/// the title. Hash-based so repeated extractions of the same page agree.
fn synth_metrics(title: &str) -> (f64, f64) {
    let digest = Sha256::digest(title.as_bytes());
    let price = 8.0 + unit_fraction(&digest[..8]) * 25.0;
    let rating = 3.8 + unit_fraction(&digest[8..16]) * 1.2;
    (round_to(price, 100.0), round_to(rating, 10.0))
}

/// Map 8 digest bytes to a fraction in [0, 1) exactly representable in f64.
fn unit_fraction(bytes: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    let seed = u64::from_be_bytes(buf) >> 11;
    seed as f64 / (1u64 << 53) as f64
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
