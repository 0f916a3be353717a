// src/error.rs

//! Unified error handling for the bookscout application.

use thiserror::Error;

/// Result type alias for bookscout operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// Refresh cycles never surface these: a failed fetch or an empty parse
/// degrades to sample data per category. Errors here are reserved for
/// startup (config, server bind) and the CLI surface.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
