// src/models/mod.rs

//! Domain models for the bookscout application.

mod book;
mod category;
mod config;

// Re-export all public types
pub use book::{BookRecord, Provenance};
pub use category::Category;
pub use config::{CategoryInfo, Config, RefreshConfig, ScraperConfig, ServerConfig};
