//! Scrape pipeline
//!
//! This module contains the fetch → extract loop:
//! - HTTP fetching with a fixed delay between requests
//! - Selector-driven extraction into records
//! - Orchestration of a whole run

mod extractor;
mod fetcher;
mod orchestrator;

pub use extractor::CompiledTarget;
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use orchestrator::{run, Orchestrator};
