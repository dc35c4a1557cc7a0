//! Report generation for statistics runs
//!
//! Three writers share one [`ReportWriter`] interface so the command runner
//! can stream finished files into whichever format was requested:
//!
//! - [`HumanReport`]: labelled per-column blocks for terminals
//! - [`CsvReport`]: one row per column with data, for spreadsheets
//! - [`JsonReport`]: a single document emitted once the run finishes

pub mod human;
pub mod json;
pub mod number_format;
pub mod tabular;

pub use human::HumanReport;
pub use json::JsonReport;
pub use number_format::{Notation, NumberFormat};
pub use tabular::CsvReport;

use std::io::Write;
use std::time::Duration;

use clap::ValueEnum;
use serde::Serialize;

use crate::Result;
use crate::app::models::FileStatistics;
use crate::config::StatsConfig;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colours
    #[default]
    Human,
    /// JSON output for machine consumption
    Json,
    /// CSV output for data analysis
    Csv,
}

/// A file that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

impl FileFailure {
    pub fn new(file: impl Into<String>, error: impl ToString) -> Self {
        Self {
            file: file.into(),
            error: error.to_string(),
        }
    }
}

/// Totals for a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Inputs resolved to files
    pub files_total: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    /// Columns that produced statistics, across all files
    pub columns_reported: usize,
    /// Whether the run stopped early because of `--fail-fast`
    pub aborted: bool,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Whether every resolved file was processed
    pub fn is_success(&self) -> bool {
        self.files_failed == 0 && !self.aborted
    }
}

/// Streaming sink for run results
pub trait ReportWriter {
    /// Called once before any file
    fn begin(&mut self) -> Result<()>;

    /// Called once per successfully processed file, in input order
    fn write_file(&mut self, stats: &FileStatistics) -> Result<()>;

    /// Called once per file that could not be processed
    fn write_failure(&mut self, failure: &FileFailure) -> Result<()>;

    /// Called once after the last file, also when the run was aborted
    fn finish(&mut self, summary: &RunSummary) -> Result<()>;
}

/// Build the writer for `format`, sending output to `out`
pub fn create_report_writer<'a>(
    format: OutputFormat,
    config: &StatsConfig,
    out: Box<dyn Write + 'a>,
) -> Box<dyn ReportWriter + 'a> {
    match format {
        OutputFormat::Human => Box::new(HumanReport::new(out, config)),
        OutputFormat::Json => Box::new(JsonReport::new(out, config)),
        OutputFormat::Csv => Box::new(CsvReport::new(out, config)),
    }
}
