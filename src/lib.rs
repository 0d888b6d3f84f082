//! pdfscout: a polite PDF discovery and cataloging pipeline
//!
//! This crate discovers downloadable PDF documents on the public web through
//! search-engine backends and bounded site crawling, validates each candidate
//! URL with partial-download metadata extraction, and merges the survivors
//! into a persisted, deduplicated catalog.

pub mod categories;
pub mod collection;
pub mod config;
pub mod crawler;
pub mod pipeline;
pub mod politeness;
pub mod search;
pub mod url;
pub mod validate;

use thiserror::Error;

/// Main error type for pdfscout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Store(#[from] collection::StoreError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for pdfscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use collection::{Collection, DocumentEntry};
pub use config::Config;
pub use pipeline::Pipeline;
pub use politeness::Politeness;
