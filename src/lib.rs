//! Daria-Scrape: a small archiver for Outpost Daria Reborn
//!
//! This crate fetches a fixed list of pages, extracts fields from them with
//! CSS selectors and writes the resulting records to disk as CSV or JSON.

pub mod config;
pub mod output;
pub mod record;
pub mod scrape;

use thiserror::Error;

/// Main error type for Daria-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Write error: {0}")]
    Write(#[from] output::WriteError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector for field '{field}' of target '{target}': {message}")]
    InvalidSelector {
        target: String,
        field: String,
        message: String,
    },
}

/// Result type alias for Daria-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, OutputFormat, Settings, Target};
pub use output::{write_records, RunSummary};
pub use record::Record;
pub use scrape::{run, Orchestrator};
