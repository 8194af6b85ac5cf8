//! Configuration module for Daria-Scrape
//!
//! This module holds the built-in target list and settings, and handles
//! loading, parsing, and validating TOML files that override them.
//!
//! # Example
//!
//! ```no_run
//! use daria_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scrape.toml")).unwrap();
//! println!("Scraping {} targets", config.targets.len());
//! ```

mod defaults;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, LoggingConfig, OutputFormat, Settings, Target};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

pub use validation::{validate, validate_and_compile, RESERVED_FIELDS};
pub(crate) use validation::seconds_to_duration;
