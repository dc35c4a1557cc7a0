//! Test utilities for the column aggregator
//!
//! Helpers for building series, feeding literal rows and comparing
//! arbitrary-precision results against expected decimals.

use rug::Float;

use super::ColumnAggregator;
use crate::app::models::{ColumnSeries, FileStatistics};
use crate::config::StatsConfig;

// Test modules
mod aggregator_tests;

/// Precision used by most tests
pub const TEST_PRECISION: u32 = 256;

/// Build a series from literal values at [`TEST_PRECISION`]
pub fn series_of(values: &[f64]) -> ColumnSeries {
    let mut series = ColumnSeries::new(0, "Column 1", TEST_PRECISION);
    for v in values {
        series.push(Float::with_val(TEST_PRECISION, *v));
    }
    series
}

/// Feed comma-separated lines (one-based row numbers) and finalize
pub fn aggregate_lines(config: &StatsConfig, lines: &[&str]) -> FileStatistics {
    let mut aggregator = ColumnAggregator::new("test.csv", config);
    for (i, line) in lines.iter().enumerate() {
        let fields: Vec<&str> = if line.is_empty() {
            Vec::new()
        } else {
            line.split(',').collect()
        };
        aggregator.push_row(&fields, i + 1);
    }
    aggregator.finalize()
}

/// Assert `actual` is within `tolerance` of `expected`
pub fn assert_close(actual: &Float, expected: f64, tolerance: f64) {
    let diff = (actual.to_f64() - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {expected}, got {} (diff {diff})",
        actual.to_f64()
    );
}
