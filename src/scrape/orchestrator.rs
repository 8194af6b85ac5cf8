//! Run orchestration
//!
//! This module contains the main scrape loop:
//! - Validating the configuration and compiling every selector up front
//! - Fetching and extracting each target in declared order
//! - Counting failures without aborting the run
//! - Writing all records once at the end

use crate::config::{validate_and_compile, Config, Settings};
use crate::output::{write_records, RunSummary, TargetFailure};
use crate::record::Record;
use crate::scrape::extractor::CompiledTarget;
use crate::scrape::fetcher::Fetcher;
use crate::ScrapeError;
use chrono::Utc;

/// Drives one run over the configured targets
pub struct Orchestrator {
    settings: Settings,
    targets: Vec<CompiledTarget>,
    fetcher: Fetcher,
}

impl Orchestrator {
    /// Creates a new orchestrator
    ///
    /// Validation and selector compilation happen here, so configuration
    /// errors surface before the first request.
    ///
    /// # Returns
    ///
    /// * `Ok(Orchestrator)` - Ready to run
    /// * `Err(ScrapeError)` - Invalid configuration or HTTP client failure
    pub fn new(config: Config) -> Result<Self, ScrapeError> {
        let targets = validate_and_compile(&config)?;
        let fetcher = Fetcher::new(&config.settings)?;

        Ok(Self {
            settings: config.settings,
            targets,
            fetcher,
        })
    }

    /// Compiled targets, in the order they will be scraped
    pub fn targets(&self) -> &[CompiledTarget] {
        &self.targets
    }

    /// Runs every target and writes the collected records
    ///
    /// A failed fetch is logged and counted; the loop continues with the
    /// next target. A write failure aborts the run.
    pub async fn run(&mut self) -> Result<RunSummary, ScrapeError> {
        let mut summary = RunSummary::new(Utc::now());
        let mut records: Vec<Record> = Vec::with_capacity(self.targets.len());

        tracing::info!("Starting run over {} targets", self.targets.len());

        for target in &self.targets {
            match self.fetcher.fetch(target.url().as_str()).await {
                Ok(body) => {
                    let record = target.extract(&body, Utc::now());
                    tracing::info!(
                        "Scraped {}: {} links, title {:?}",
                        target.name(),
                        record.links.len(),
                        record.title.as_deref().unwrap_or("")
                    );
                    records.push(record);
                    summary.record_success();
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch {}: {}", target.name(), e);
                    summary.record_failure(TargetFailure {
                        name: target.name().to_string(),
                        url: e.url().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let path = write_records(&records, &self.settings, summary.started_at)?;
        summary.output_path = Some(path);
        summary.finished_at = Some(Utc::now());

        tracing::info!(
            "Run completed: {} succeeded, {} failed",
            summary.succeeded,
            summary.failed
        );

        Ok(summary)
    }
}

/// Runs a complete scrape
///
/// # Example
///
/// ```no_run
/// use daria_scrape::config::load_config;
/// use daria_scrape::scrape::run;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("scrape.toml"))?;
/// let summary = run(config).await?;
/// println!("{}", summary);
/// # Ok(())
/// # }
/// ```
pub async fn run(config: Config) -> Result<RunSummary, ScrapeError> {
    let mut orchestrator = Orchestrator::new(config)?;
    orchestrator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, Target};
    use crate::ConfigError;

    fn create_test_config(targets: Vec<Target>) -> Config {
        Config {
            settings: Settings {
                request_delay: 0.0,
                timeout: 1.0,
                ..Settings::default()
            },
            logging: LoggingConfig::default(),
            targets,
        }
    }

    #[test]
    fn test_orchestrator_compiles_targets_in_order() {
        let config = create_test_config(vec![
            Target::new("B", "http://example.com/b").with_selector("title", "h1"),
            Target::new("A", "http://example.com/a"),
        ]);
        let orchestrator = Orchestrator::new(config).unwrap();
        let names: Vec<_> = orchestrator.targets().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_bad_selector_fails_before_fetching() {
        let config = create_test_config(vec![
            Target::new("Ok", "http://example.com/"),
            Target::new("Broken", "http://example.com/x").with_selector("links", "div >"),
        ]);
        let result = Orchestrator::new(config);
        assert!(matches!(
            result,
            Err(ScrapeError::Config(ConfigError::InvalidSelector { .. }))
        ));
    }

    #[test]
    fn test_out_of_range_timeout_is_a_config_error() {
        let mut config = create_test_config(vec![Target::new("Ok", "http://example.com/")]);
        config.settings.timeout = 1e20;
        assert!(matches!(
            Orchestrator::new(config),
            Err(ScrapeError::Config(ConfigError::Validation(_)))
        ));

        let mut config = create_test_config(vec![Target::new("Ok", "http://example.com/")]);
        config.settings.request_delay = 1e20;
        assert!(matches!(
            Orchestrator::new(config),
            Err(ScrapeError::Config(ConfigError::Validation(_)))
        ));
    }
}
