//! Daria-Scrape main entry point
//!
//! This is the command-line interface for the Daria-Scrape archiver.

use anyhow::Context;
use clap::Parser;
use daria_scrape::config::{load_config_with_hash, validate, Config, LoggingConfig};
use daria_scrape::output::print_summary;
use daria_scrape::scrape::run;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Daria-Scrape: archive pages from Outpost Daria Reborn
///
/// Fetches every configured target once, extracts fields with CSS selectors
/// and writes all records to a single CSV or JSON file. Without a CONFIG
/// file the built-in target list is used.
#[derive(Parser, Debug)]
#[command(name = "daria-scrape")]
#[command(version)]
#[command(about = "Archive pages from Outpost Daria Reborn", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults to the built-in targets)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scraped without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, config_hash) = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            (config, Some(hash))
        }
        None => {
            let config = Config::builtin();
            validate(&config).context("Built-in configuration is invalid")?;
            (config, None)
        }
    };

    setup_logging(cli.verbose, cli.quiet, &config.logging)?;

    match (&cli.config, config_hash) {
        (Some(path), Some(hash)) => {
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash)
        }
        _ => tracing::info!("Using built-in configuration"),
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(ExitCode::SUCCESS);
    }

    let summary = run(config).await.context("Scrape run failed")?;
    print_summary(&summary);

    if summary.all_failed() {
        tracing::error!("Every target failed");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Sets up the logging/tracing subscriber
///
/// Events go to stderr and, when configured, are appended to a log file.
fn setup_logging(verbose: u8, quiet: bool, logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = || {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new(format!("daria_scrape={},warn", logging.level)),
                1 => EnvFilter::new("daria_scrape=debug,info"),
                2 => EnvFilter::new("daria_scrape=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    };

    let file_layer = match &logging.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(filter()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter()),
        )
        .with(file_layer)
        .init();

    Ok(())
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== Daria-Scrape Dry Run ===\n");

    println!("Settings:");
    println!("  User agent: {}", config.settings.user_agent);
    println!("  Request delay: {}s", config.settings.request_delay);
    println!("  Timeout: {}s", config.settings.timeout);
    println!("  Output format: {}", config.settings.output_format);
    println!("  Data directory: {}", config.settings.data_dir.display());
    println!("  Filename prefix: {}", config.settings.filename_prefix);

    println!("\nTargets ({}):", config.targets.len());
    for target in &config.targets {
        println!("  - {} <{}>", target.name, target.url);
        for (field, selector) in &target.selectors {
            println!("    * {} = {}", field, selector);
        }
    }

    println!("\n✓ Configuration is valid");
}
