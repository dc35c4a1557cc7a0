//! Streaming column aggregation for one input file
//!
//! Rows are fed one at a time. Each row is classified, then either becomes
//! the header (first non-skipped row, when headers are enabled) or is
//! ingested field by field into sparse per-column series.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::row_classifier::{RowClass, classify_row};
use super::statistics::compute_statistics;
use crate::app::models::{
    ColumnOutcome, ColumnSeries, ColumnSummary, FileStatistics, IngestStats,
};
use crate::app::services::value_parser::{FieldLocation, ValueParser};
use crate::config::StatsConfig;
use crate::constants::synthetic_column_label;

/// What happened to a row passed to [`ColumnAggregator::push_row`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Skipped,
    Header,
    Data,
}

/// Accumulates per-column series for exactly one file
///
/// A new aggregator is created for every file; nothing carries over.
#[derive(Debug)]
pub struct ColumnAggregator {
    file_name: String,
    parser: ValueParser,
    comment_marker: char,
    header_pending: bool,
    labels: Vec<String>,
    columns: BTreeMap<usize, ColumnSeries>,
    stats: IngestStats,
}

impl ColumnAggregator {
    /// Create an aggregator for `file_name` using the run configuration
    pub fn new(file_name: impl Into<String>, config: &StatsConfig) -> Self {
        Self {
            file_name: file_name.into(),
            parser: ValueParser::new(config.precision),
            comment_marker: config.comment_marker,
            header_pending: config.has_header,
            labels: Vec::new(),
            columns: BTreeMap::new(),
            stats: IngestStats::new(),
        }
    }

    /// Name used in diagnostics and reports
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Classify a row with this aggregator's comment marker
    pub fn classify_row<S: AsRef<str>>(&self, fields: &[S]) -> RowClass {
        classify_row(fields, self.comment_marker)
    }

    /// Whether the header row is still expected
    pub fn awaiting_header(&self) -> bool {
        self.header_pending
    }

    /// Labels taken from the header row (empty when there is none)
    pub fn header_labels(&self) -> &[String] {
        &self.labels
    }

    /// Series collected so far for a zero-based column index
    pub fn series(&self, index: usize) -> Option<&ColumnSeries> {
        self.columns.get(&index)
    }

    /// Counters gathered so far
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Classify a row and route it to header resolution or ingestion
    pub fn push_row<S: AsRef<str>>(&mut self, fields: &[S], row_number: usize) -> RowOutcome {
        self.stats.rows_read += 1;

        if self.classify_row(fields) == RowClass::Skip {
            self.stats.rows_skipped += 1;
            debug!("{}: skipping blank or comment row {}", self.file_name, row_number);
            return RowOutcome::Skipped;
        }

        if self.header_pending {
            self.set_header(fields);
            debug!(
                "{}: row {} is the header ({} labels)",
                self.file_name,
                row_number,
                self.labels.len()
            );
            return RowOutcome::Header;
        }

        self.ingest(fields, row_number);
        RowOutcome::Data
    }

    /// Fold every non-empty field of a data row into its column
    ///
    /// Empty fields are missing values. A field that fails to parse is
    /// logged and skipped; the rest of the row is still used.
    pub fn ingest<S: AsRef<str>>(&mut self, fields: &[S], row_number: usize) {
        self.stats.data_rows += 1;

        for (index, field) in fields.iter().enumerate() {
            let raw = field.as_ref();
            let location = FieldLocation {
                file: &self.file_name,
                row: row_number,
                column: index,
            };

            match self.parser.parse_at(raw, location) {
                Ok(Some(value)) => {
                    if !self.columns.contains_key(&index) {
                        let label = self.label_for(index);
                        self.columns.insert(
                            index,
                            ColumnSeries::new(index, label, self.parser.precision()),
                        );
                    }
                    if let Some(series) = self.columns.get_mut(&index) {
                        series.push(value);
                    }
                    self.stats.values_parsed += 1;
                }
                Ok(None) => {
                    self.stats.missing_values += 1;
                }
                Err(error) => {
                    warn!("Skipping {}", error);
                    self.stats.add_issue(error.to_string());
                }
            }
        }
    }

    /// Count blank or comment lines the tokenizer consumed without a record
    pub fn note_dropped_rows(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.stats.rows_read += count;
        self.stats.rows_skipped += count;
        debug!("{}: {} blank or comment lines dropped", self.file_name, count);
    }

    /// Record a row the tokenizer could not decode
    pub fn note_unreadable_row(&mut self, row_number: usize, message: &str) {
        self.stats.unreadable_rows += 1;
        warn!(
            "Skipping unreadable row {} in file {}: {}",
            row_number, self.file_name, message
        );
    }

    /// Reduce every column to statistics
    ///
    /// Columns run from index 0 up to the highest index seen in data or in
    /// the header; a column without values yields [`ColumnOutcome::NoData`].
    pub fn finalize(self) -> FileStatistics {
        let width = self
            .columns
            .keys()
            .next_back()
            .map_or(0, |last| last + 1)
            .max(self.labels.len());

        let mut series_by_index = self.columns;
        let mut columns = Vec::with_capacity(width);

        for index in 0..width {
            let summary = match series_by_index.remove(&index) {
                Some(series) => {
                    let label = series.label().to_string();
                    let outcome = match compute_statistics(series) {
                        Some(record) => ColumnOutcome::Statistics(Box::new(record)),
                        None => ColumnOutcome::NoData,
                    };
                    ColumnSummary {
                        index,
                        label,
                        outcome,
                    }
                }
                None => ColumnSummary {
                    index,
                    label: resolve_label(&self.labels, index),
                    outcome: ColumnOutcome::NoData,
                },
            };
            columns.push(summary);
        }

        debug!(
            "{}: finalized {} columns from {} data rows",
            self.file_name,
            columns.len(),
            self.stats.data_rows
        );

        FileStatistics {
            file_name: self.file_name,
            columns,
            ingest: self.stats,
        }
    }

    fn set_header<S: AsRef<str>>(&mut self, fields: &[S]) {
        self.labels = fields.iter().map(|f| f.as_ref().trim().to_string()).collect();
        self.header_pending = false;
    }

    fn label_for(&self, index: usize) -> String {
        resolve_label(&self.labels, index)
    }
}

/// Header text for a column, or the synthetic `Column N` label
fn resolve_label(labels: &[String], index: usize) -> String {
    labels
        .get(index)
        .filter(|label| !label.is_empty())
        .cloned()
        .unwrap_or_else(|| synthetic_column_label(index))
}
