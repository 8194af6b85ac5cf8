//! Built-in configuration used when no config file is given

use crate::config::types::{Config, LoggingConfig, OutputFormat, Settings, Target};
use std::path::PathBuf;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const REQUEST_DELAY: f64 = 1.0;
pub const TIMEOUT: f64 = 30.0;
pub const OUTPUT_FORMAT: OutputFormat = OutputFormat::Json;
pub const DATA_DIR: &str = "data";
pub const FILENAME_PREFIX: &str = "daria_scraper";
pub const LOG_FILE: &str = "logs/daria_scraper.log";

const SITE: &str = "https://outpost-daria-reborn.info";

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            request_delay: REQUEST_DELAY,
            timeout: TIMEOUT,
            output_format: OUTPUT_FORMAT,
            data_dir: PathBuf::from(DATA_DIR),
            filename_prefix: FILENAME_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// The target list this tool was written for
    pub fn builtin() -> Self {
        let targets = vec![
            Target::new("Characters", format!("{SITE}/characters.html"))
                .with_selector("title", "title")
                .with_selector("links", "a[href]")
                .with_selector("content", "body"),
            Target::new("Daria", format!("{SITE}/ch_daria.html"))
                .with_selector("title", "title")
                .with_selector("links", "a[href*='art_alter-egos.html']")
                .with_selector("content", "body"),
            Target::new("Alter Egos", format!("{SITE}/art_alter-egos.html"))
                .with_selector("title", "title")
                .with_selector("links", "img[src]")
                .with_selector("content", "body"),
        ];

        Self {
            settings: Settings::default(),
            logging: LoggingConfig {
                file: Some(PathBuf::from(LOG_FILE)),
                ..LoggingConfig::default()
            },
            targets,
        }
    }
}
