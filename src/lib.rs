//! bfbs Library
//!
//! A Rust library for computing descriptive statistics over every numeric
//! column of delimited text files, using arbitrary-precision (MPFR) floating
//! point so that large or ill-conditioned datasets do not suffer from `f64`
//! accumulation error.
//!
//! This library provides tools for:
//! - Parsing text fields into arbitrary-precision values at a chosen bit width
//! - Classifying rows (blank, comment, header, data) while streaming a file
//! - Aggregating sparse per-column series that tolerate ragged rows
//! - Reducing each series to count, sum, mean, variances, standard
//!   deviations, min/max/median/range, skewness and excess kurtosis
//! - Writing human, CSV and JSON reports

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod column_aggregator;
        pub mod csv_reader;
        pub mod report;
        pub mod value_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{ColumnOutcome, ColumnSeries, FileStatistics, StatisticsRecord};
pub use app::services::column_aggregator::{ColumnAggregator, RowClass};
pub use app::services::csv_reader::CsvStatsReader;
pub use app::services::report::{Notation, NumberFormat, OutputFormat};
pub use config::StatsConfig;

/// Result type alias for bfbs
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for statistics runs
///
/// Only [`Error::FileUnavailable`] and [`Error::MalformedSkipOrHeaderLine`]
/// end the processing of a file. [`Error::InvalidValue`] is logged and
/// recorded by the aggregator, never propagated out of ingestion.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Input file could not be opened
    #[error("Cannot open file '{path}': {source}")]
    FileUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A pre-skipped line or the header row could not be read
    #[error("Cannot read line {line} of file '{file}': {message}")]
    MalformedSkipOrHeaderLine {
        file: String,
        line: usize,
        message: String,
    },

    /// A field could not be converted to a number
    #[error("Invalid value '{text}' at row {row}, column {column} in file '{file}': {reason}")]
    InvalidValue {
        file: String,
        row: usize,
        column: usize,
        text: String,
        reason: String,
    },

    /// A column was requested as a statistics record but holds no values
    #[error("Column '{label}' in file '{file}' has no valid data")]
    EmptyColumn { file: String, label: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV report writing failed
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// JSON report serialization failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a file unavailable error
    pub fn file_unavailable(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed skip/header line error
    pub fn malformed_skip_or_header_line(
        file: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedSkipOrHeaderLine {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid value error (column is one-based)
    pub fn invalid_value(
        file: impl Into<String>,
        row: usize,
        column: usize,
        text: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            file: file.into(),
            row,
            column,
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Create an empty column error
    pub fn empty_column(file: impl Into<String>, label: impl Into<String>) -> Self {
        Self::EmptyColumn {
            file: file.into(),
            label: label.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv(message: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Whether this error ends the processing of a single input file
    pub fn is_file_fatal(&self) -> bool {
        matches!(
            self,
            Self::FileUnavailable { .. } | Self::MalformedSkipOrHeaderLine { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            message: "CSV writing failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}
