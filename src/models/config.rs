//! Application configuration structures.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable overriding the refresh interval, in seconds.
pub const ENV_REFRESH_SECS: &str = "BOOKSCOUT_REFRESH_SECS";

/// Environment variable overriding the category list.
///
/// Comma-separated entries, each either a bare slug or `slug:Name:icon`.
pub const ENV_CATEGORIES: &str = "BOOKSCOUT_CATEGORIES";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client and scraping behavior settings
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Refresh scheduling settings
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// API server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Categories refreshed each cycle.
    ///
    /// This list is fixed configuration: live category discovery from the
    /// remote site is a non-goal.
    #[serde(default = "defaults::categories")]
    pub categories: Vec<CategoryInfo>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply environment variable overrides for the refresh period and
    /// category list.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            env::var(ENV_REFRESH_SECS).ok().as_deref(),
            env::var(ENV_CATEGORIES).ok().as_deref(),
        );
    }

    fn apply_overrides(&mut self, refresh_secs: Option<&str>, categories: Option<&str>) {
        if let Some(raw) = refresh_secs {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => self.refresh.interval_secs = secs,
                _ => log::warn!("Ignoring invalid {}={:?}", ENV_REFRESH_SECS, raw),
            }
        }

        if let Some(raw) = categories {
            let parsed: Vec<CategoryInfo> = raw
                .split(',')
                .filter_map(CategoryInfo::parse_entry)
                .collect();
            if parsed.is_empty() {
                log::warn!("Ignoring empty {}={:?}", ENV_CATEGORIES, raw);
            } else {
                self.categories = parsed;
            }
        }
    }

    /// Validate configuration values for basic sanity.
    ///
    /// Called once at startup; a failure here is fatal, never mid-cycle.
    pub fn validate(&self) -> Result<()> {
        if self.scraper.user_agent.trim().is_empty() {
            return Err(AppError::validation("scraper.user_agent is empty"));
        }
        if self.scraper.timeout_secs == 0 {
            return Err(AppError::validation("scraper.timeout_secs must be > 0"));
        }
        if self.scraper.max_concurrent == 0 {
            return Err(AppError::validation("scraper.max_concurrent must be > 0"));
        }
        Url::parse(&self.scraper.base_url)?;
        if self.refresh.interval_secs == 0 {
            return Err(AppError::validation("refresh.interval_secs must be > 0"));
        }
        if self.categories.is_empty() {
            return Err(AppError::validation("No categories defined"));
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.slug.trim().is_empty() {
                return Err(AppError::validation("Category with empty slug"));
            }
            // Snapshots key book lists by slug; a duplicate would break
            // the one-list-per-category invariant.
            if !seen.insert(category.slug.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate category slug '{}'",
                    category.slug
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            refresh: RefreshConfig::default(),
            server: ServerConfig::default(),
            categories: defaults::categories(),
        }
    }
}

/// HTTP client and scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Base URL of the scraped site
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Label attached to records and status payloads
    #[serde(default = "defaults::source_label")]
    pub source_label: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds (every fetch attempt is bounded)
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent category fetches per refresh cycle
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl ScraperConfig {
    /// Build the listing URL for a category slug.
    pub fn category_url(&self, slug: &str) -> String {
        let path = format!("en-gb/category/{slug}");
        match Url::parse(&self.base_url).and_then(|base| base.join(&path)) {
            Ok(u) => u.to_string(),
            Err(_) => format!("{}/{}", self.base_url.trim_end_matches('/'), path),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            source_label: defaults::source_label(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Refresh scheduling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between automatic refresh cycles
    #[serde(default = "defaults::refresh_interval")]
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::refresh_interval(),
        }
    }
}

/// API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the API server to
    #[serde(default = "defaults::bind_addr")]
    pub bind_addr: String,

    /// Port to listen on
    #[serde(default = "defaults::port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: defaults::bind_addr(),
            port: defaults::port(),
        }
    }
}

/// A configured catalog category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryInfo {
    /// URL-safe identifier used in listing URLs and record ids
    pub slug: String,

    /// Human-readable display name
    pub name: String,

    /// Decorative icon
    #[serde(default = "defaults::category_icon")]
    pub icon: String,
}

impl CategoryInfo {
    /// Parse one `BOOKSCOUT_CATEGORIES` entry: `slug` or `slug:Name:icon`.
    fn parse_entry(entry: &str) -> Option<Self> {
        let mut parts = entry.trim().splitn(3, ':');
        let slug = parts.next()?.trim();
        if slug.is_empty() {
            return None;
        }
        let name = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| capitalize(slug));
        let icon = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(defaults::category_icon);
        Some(Self {
            slug: slug.to_string(),
            name,
            icon,
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

mod defaults {
    use super::CategoryInfo;

    // Scraper defaults
    pub fn base_url() -> String {
        "https://www.worldofbooks.com".into()
    }
    pub fn source_label() -> String {
        "worldofbooks.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; bookscout/0.1)".into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn max_concurrent() -> usize {
        4
    }

    // Refresh defaults
    pub fn refresh_interval() -> u64 {
        600
    }

    // Server defaults
    pub fn bind_addr() -> String {
        "0.0.0.0".into()
    }
    pub fn port() -> u16 {
        3000
    }

    pub fn category_icon() -> String {
        "📖".into()
    }

    // Category defaults
    pub fn categories() -> Vec<CategoryInfo> {
        [
            ("fiction", "Fiction", "📚"),
            ("science", "Science", "🔬"),
            ("history", "History", "📜"),
            ("technology", "Technology", "💻"),
            ("children", "Children", "👶"),
            ("biography", "Biography", "👤"),
        ]
        .into_iter()
        .map(|(slug, name, icon)| CategoryInfo {
            slug: slug.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        })
        .collect()
    }
}
