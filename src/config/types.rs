use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Main configuration structure for Daria-Scrape
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(rename = "target", default)]
    pub targets: Vec<Target>,
}

/// Global knobs shared by every target of a run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Pause between consecutive requests (seconds)
    #[serde(rename = "request-delay")]
    pub request_delay: f64,

    /// Whole-request timeout (seconds)
    pub timeout: f64,

    /// Format of the run's output file
    #[serde(rename = "output-format")]
    pub output_format: OutputFormat,

    /// Directory the output file is written into
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,

    /// Prefix of the output file name, followed by the run timestamp
    #[serde(rename = "filename-prefix")]
    pub filename_prefix: String,
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    #[default]
    Json,
}

impl OutputFormat {
    /// File extension used for this format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for this crate's events (e.g. "info", "debug")
    pub level: String,

    /// Optional file that receives a copy of every log line
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// One page to scrape and the selectors applied to it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    /// Human-readable name, copied into every record
    pub name: String,

    /// Absolute http(s) URL of the page
    pub url: String,

    /// Field name to CSS selector
    #[serde(default)]
    pub selectors: BTreeMap<String, String>,
}

impl Target {
    /// Creates a target with no selectors
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            selectors: BTreeMap::new(),
        }
    }

    /// Adds a selector for the given field, replacing any previous one
    pub fn with_selector(mut self, field: impl Into<String>, selector: impl Into<String>) -> Self {
        self.selectors.insert(field.into(), selector.into());
        self
    }
}
