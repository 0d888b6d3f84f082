//! Configuration module for pdfscout
//!
//! Handles loading, parsing, and validating TOML configuration files. A
//! missing config file is not an error at this layer: `Config::default()`
//! carries the full set of built-in defaults.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    default_user_agents, Config, CrawlerConfig, OutputConfig, PolitenessConfig, SearchConfig,
    ValidatorConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config};
