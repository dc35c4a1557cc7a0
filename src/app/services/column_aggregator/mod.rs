//! Column-wise aggregation and arbitrary-precision statistics
//!
//! This module is the engine of the crate. It turns a stream of rows (each
//! an ordered sequence of raw text fields) into one statistics record per
//! column position.
//!
//! ## Architecture
//!
//! - [`row_classifier`] - Blank and comment row detection
//! - [`aggregator`] - Header resolution and per-column ingestion
//! - [`statistics`] - Reduction of a series to its statistics record
//!
//! ## Usage
//!
//! ```rust
//! use bfbs::{ColumnAggregator, StatsConfig};
//!
//! let config = StatsConfig::default().with_header(true);
//! let mut aggregator = ColumnAggregator::new("inline.csv", &config);
//!
//! aggregator.push_row(&["x", "y"], 1);
//! aggregator.push_row(&["1", "10"], 2);
//! aggregator.push_row(&["# comment", ""], 3);
//! aggregator.push_row(&["3", "30"], 4);
//!
//! let stats = aggregator.finalize();
//! let x = stats.record("x").unwrap();
//! assert_eq!(x.count, 2);
//! assert_eq!(x.mean, 2);
//! ```

pub mod aggregator;
pub mod row_classifier;
pub mod statistics;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use aggregator::{ColumnAggregator, RowOutcome};
pub use row_classifier::{RowClass, classify_row};
pub use statistics::compute_statistics;
