//! Application constants for bfbs
//!
//! This module contains the default values, limits and fixed labels used
//! throughout the statistics engine and its command-line front end.

// =============================================================================
// Program Identity
// =============================================================================

/// Program name shown in report banners
pub const PROGRAM_NAME: &str = "bfbs";

/// Program version shown in report banners
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Arithmetic Precision
// =============================================================================

/// Default significand width (bits) for every arbitrary-precision value
pub const DEFAULT_PRECISION_BITS: u32 = 256;

/// Smallest accepted precision (bits)
pub const MIN_PRECISION_BITS: u32 = 16;

/// Largest accepted precision (bits)
pub const MAX_PRECISION_BITS: u32 = 1024;

// =============================================================================
// Input Handling
// =============================================================================

/// Marker that turns a row into a comment when it leads the first field
pub const DEFAULT_COMMENT_MARKER: char = '#';

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Default number of leading lines skipped before header resolution
pub const DEFAULT_SKIP_LINES: usize = 0;

/// File extension picked up when an input argument is a directory
pub const CSV_EXTENSION: &str = "csv";

// =============================================================================
// Report Layout
// =============================================================================

/// Prefix for labels of columns that have no header text
pub const SYNTHETIC_COLUMN_PREFIX: &str = "Column";

/// Column order of the tabular (CSV) report
pub const CSV_REPORT_HEADERS: &[&str] = &[
    "file",
    "column",
    "count",
    "min",
    "mean",
    "median",
    "max",
    "range",
    "sum",
    "variance",
    "std_dev",
    "skewness",
    "kurtosis",
];

/// Shortest notation switches to scientific below this decimal exponent
pub const SHORTEST_MIN_FIXED_EXPONENT: i64 = -5;

/// Without a digit count, shortest notation switches to scientific at this
/// decimal exponent
pub const SHORTEST_MAX_FIXED_EXPONENT: i64 = 16;

// =============================================================================
// Exit Codes
// =============================================================================

/// Every file was processed
pub const EXIT_SUCCESS: i32 = 0;

/// At least one file could not be processed, or the run could not start
pub const EXIT_FAILURE: i32 = 1;

/// Build the synthetic label for a zero-based column index
pub fn synthetic_column_label(index: usize) -> String {
    format!("{} {}", SYNTHETIC_COLUMN_PREFIX, index + 1)
}
