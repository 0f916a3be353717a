// src/services/mod.rs

//! Acquisition services: page fetching, title extraction, and the
//! sample fallback catalog.

pub mod extractor;
pub mod fetcher;
pub mod samples;

pub use extractor::extract_books;
pub use fetcher::{Fetch, HttpFetcher};
pub use samples::sample_books;
