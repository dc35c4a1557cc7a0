//! Core data structures for column statistics
//!
//! Defines the per-column series accumulated while a file is read, the
//! statistics record reduced from it, and the per-file result handed to
//! report writers.

use crate::constants::synthetic_column_label;
use crate::{Error, Result};
use rug::Float;
use serde::{Deserialize, Serialize};

/// Values collected for one column position of one file
///
/// The label is set when the series is created and never changes, even if
/// later rows disagree on field count.
#[derive(Debug, Clone)]
pub struct ColumnSeries {
    index: usize,
    label: String,
    values: Vec<Float>,
    sum: Float,
}

impl ColumnSeries {
    /// Create an empty series whose running sum uses `precision` bits
    pub fn new(index: usize, label: impl Into<String>, precision: u32) -> Self {
        Self {
            index,
            label: label.into(),
            values: Vec::new(),
            sum: Float::with_val(precision, 0),
        }
    }

    /// Append a value and fold it into the running sum
    pub fn push(&mut self, value: Float) {
        self.sum += &value;
        self.values.push(value);
    }

    /// Zero-based column index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Values in original row order
    pub fn values(&self) -> &[Float] {
        &self.values
    }

    /// Running sum
    pub fn sum(&self) -> &Float {
        &self.sum
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Precision of the running sum (bits)
    pub fn precision(&self) -> u32 {
        self.sum.prec()
    }

    /// Give up the values and sum for reduction
    pub fn into_parts(self) -> (Vec<Float>, Float) {
        (self.values, self.sum)
    }
}

/// Descriptive statistics for one column
#[derive(Debug, Clone)]
pub struct StatisticsRecord {
    pub count: usize,
    pub sum: Float,
    pub mean: Float,
    /// Divisor n - 1, zero for a single value
    pub sample_variance: Float,
    pub sample_std_dev: Float,
    /// Divisor n
    pub population_variance: Float,
    pub population_std_dev: Float,
    pub min: Float,
    pub max: Float,
    pub median: Float,
    pub range: Float,
    /// Moment skewness at full precision
    pub skewness: Float,
    /// Adjusted Fisher-Pearson skewness in `f64`
    pub skewness_f64: f64,
    /// Moment excess kurtosis at full precision
    pub kurtosis: Float,
    /// Sample excess kurtosis in `f64`
    pub kurtosis_f64: f64,
}

/// Outcome of finalizing one column
#[derive(Debug, Clone)]
pub enum ColumnOutcome {
    Statistics(Box<StatisticsRecord>),
    NoData,
}

/// Finalized result for one column position
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    /// Zero-based column index
    pub index: usize,
    pub label: String,
    pub outcome: ColumnOutcome,
}

impl ColumnSummary {
    /// Statistics if the column held any values
    pub fn record(&self) -> Option<&StatisticsRecord> {
        match &self.outcome {
            ColumnOutcome::Statistics(record) => Some(record.as_ref()),
            ColumnOutcome::NoData => None,
        }
    }
}

/// Row and value counters gathered while a file is ingested
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Rows handed to the aggregator, including skipped ones
    pub rows_read: usize,
    /// Blank and comment rows
    pub rows_skipped: usize,
    /// Rows that contributed fields (header excluded)
    pub data_rows: usize,
    /// Fields converted to numbers
    pub values_parsed: usize,
    /// Empty fields inside data rows
    pub missing_values: usize,
    /// Fields that could not be converted
    pub invalid_values: usize,
    /// Rows the tokenizer could not decode
    pub unreadable_rows: usize,
    /// Diagnostics for every invalid field, in encounter order
    pub issues: Vec<String>,
}

impl IngestStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an invalid field
    pub fn add_issue(&mut self, message: String) {
        self.invalid_values += 1;
        self.issues.push(message);
    }

    /// Percentage of non-empty data fields that parsed
    pub fn parse_rate(&self) -> f64 {
        let attempted = self.values_parsed + self.invalid_values;
        if attempted == 0 {
            100.0
        } else {
            (self.values_parsed as f64 / attempted as f64) * 100.0
        }
    }
}

/// Everything produced for one input file
#[derive(Debug, Clone)]
pub struct FileStatistics {
    pub file_name: String,
    /// Column summaries ordered by index, without gaps
    pub columns: Vec<ColumnSummary>,
    pub ingest: IngestStats,
}

impl FileStatistics {
    /// Summary for a zero-based column index
    pub fn column(&self, index: usize) -> Option<&ColumnSummary> {
        self.columns.get(index)
    }

    /// Statistics for a column looked up by label
    ///
    /// Fails with [`Error::EmptyColumn`] when the column exists but holds no
    /// values, or when no column carries the label.
    pub fn record(&self, label: &str) -> Result<&StatisticsRecord> {
        self.columns
            .iter()
            .find(|c| c.label == label)
            .and_then(ColumnSummary::record)
            .ok_or_else(|| Error::empty_column(&self.file_name, label))
    }

    /// Statistics for a zero-based column index
    pub fn record_at(&self, index: usize) -> Result<&StatisticsRecord> {
        self.column(index)
            .and_then(ColumnSummary::record)
            .ok_or_else(|| Error::empty_column(&self.file_name, synthetic_column_label(index)))
    }

    /// Number of columns that produced statistics
    pub fn columns_with_data(&self) -> usize {
        self.columns.iter().filter(|c| c.record().is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_push_updates_sum() {
        let mut series = ColumnSeries::new(0, "a", 128);
        series.push(Float::with_val(128, 1.5));
        series.push(Float::with_val(128, 2.5));

        assert_eq!(series.len(), 2);
        assert_eq!(*series.sum(), 4);
        assert_eq!(series.label(), "a");
        assert_eq!(series.precision(), 128);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_series_keeps_row_order() {
        let mut series = ColumnSeries::new(3, "Column 4", 64);
        for v in [3, 1, 2] {
            series.push(Float::with_val(64, v));
        }
        let values: Vec<f64> = series.values().iter().map(Float::to_f64).collect();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
        assert_eq!(series.index(), 3);
    }

    #[test]
    fn test_ingest_stats_parse_rate() {
        let mut stats = IngestStats::new();
        assert_eq!(stats.parse_rate(), 100.0);

        stats.values_parsed = 3;
        stats.add_issue("bad".to_string());
        assert_eq!(stats.invalid_values, 1);
        assert_eq!(stats.parse_rate(), 75.0);
    }

    #[test]
    fn test_record_lookup_on_no_data_is_empty_column() {
        let stats = FileStatistics {
            file_name: "f.csv".to_string(),
            columns: vec![ColumnSummary {
                index: 0,
                label: "a".to_string(),
                outcome: ColumnOutcome::NoData,
            }],
            ingest: IngestStats::new(),
        };

        assert!(matches!(stats.record("a"), Err(Error::EmptyColumn { .. })));
        assert!(matches!(stats.record_at(0), Err(Error::EmptyColumn { .. })));
        assert!(stats.record("missing").is_err());
        assert_eq!(stats.columns_with_data(), 0);
    }
}
