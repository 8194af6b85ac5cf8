//! Run summary
//!
//! Counts of attempted, succeeded and failed targets, plus enough detail
//! about each failure to report it.

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;

/// A target whose fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
    /// Name of the target
    pub name: String,

    /// URL that was requested
    pub url: String,

    /// Human-readable error
    pub error: String,
}

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of targets processed
    pub attempted: usize,

    /// Number of targets that produced a record
    pub succeeded: usize,

    /// Number of targets whose fetch failed
    pub failed: usize,

    /// Details of every failure, in target order
    pub failures: Vec<TargetFailure>,

    /// File the records were written to
    pub output_path: Option<PathBuf>,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    /// Creates an empty summary for a run starting now
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            attempted: 0,
            succeeded: 0,
            failed: 0,
            failures: Vec::new(),
            output_path: None,
            started_at,
            finished_at: None,
        }
    }

    /// Counts a target that produced a record
    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    /// Counts a target whose fetch failed
    pub fn record_failure(&mut self, failure: TargetFailure) {
        self.attempted += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    /// True when at least one target was tried and none succeeded
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scraped {} of {} targets ({} failed)",
            self.succeeded, self.attempted, self.failed
        )?;
        if let Some(path) = &self.output_path {
            write!(f, ", output: {}", path.display())?;
        }
        Ok(())
    }
}

/// Prints the summary line, run duration and any failures to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("{}", summary);

    if let Some(duration) = summary.duration() {
        println!(
            "Finished in {:.1}s",
            duration.num_milliseconds() as f64 / 1000.0
        );
    }

    if !summary.failures.is_empty() {
        println!("Failed targets:");
        for failure in &summary.failures {
            println!("  - {} ({}): {}", failure.name, failure.url, failure.error);
        }
    }
}
