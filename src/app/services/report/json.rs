//! JSON report: a single document for the whole run
//!
//! Arbitrary-precision values are emitted as strings so no digits are lost to
//! JSON's `f64` number type. The `f64` shape statistics are plain numbers.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{FileFailure, NumberFormat, ReportWriter, RunSummary};
use crate::app::models::{FileStatistics, IngestStats, StatisticsRecord};
use crate::config::StatsConfig;
use crate::constants::{PROGRAM_NAME, PROGRAM_VERSION};
use crate::{Error, Result};

#[derive(Debug, Serialize)]
struct JsonStatistics {
    count: usize,
    sum: String,
    mean: String,
    median: String,
    min: String,
    max: String,
    range: String,
    variance: String,
    std_dev: String,
    population_variance: String,
    population_std_dev: String,
    skewness: String,
    kurtosis: String,
    skewness_f64: f64,
    kurtosis_f64: f64,
}

impl JsonStatistics {
    fn new(record: &StatisticsRecord, fmt: &NumberFormat) -> Self {
        Self {
            count: record.count,
            sum: fmt.format(&record.sum),
            mean: fmt.format(&record.mean),
            median: fmt.format(&record.median),
            min: fmt.format(&record.min),
            max: fmt.format(&record.max),
            range: fmt.format(&record.range),
            variance: fmt.format(&record.sample_variance),
            std_dev: fmt.format(&record.sample_std_dev),
            population_variance: fmt.format(&record.population_variance),
            population_std_dev: fmt.format(&record.population_std_dev),
            skewness: fmt.format(&record.skewness),
            kurtosis: fmt.format(&record.kurtosis),
            skewness_f64: record.skewness_f64,
            kurtosis_f64: record.kurtosis_f64,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonColumn {
    index: usize,
    label: String,
    /// `null` when the column holds no valid data
    statistics: Option<JsonStatistics>,
}

#[derive(Debug, Serialize)]
struct JsonFile {
    file: String,
    columns: Vec<JsonColumn>,
    ingest: IngestStats,
}

#[derive(Debug, Serialize)]
struct JsonSummary {
    files_total: usize,
    files_processed: usize,
    files_failed: usize,
    columns_reported: usize,
    aborted: bool,
    elapsed_seconds: f64,
}

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    program: &'static str,
    version: &'static str,
    generated_at: DateTime<Utc>,
    precision_bits: u32,
    number_format: NumberFormat,
    files: &'a [JsonFile],
    failures: &'a [FileFailure],
    summary: JsonSummary,
}

/// Collects files and writes one pretty-printed document on `finish`
pub struct JsonReport<W: Write> {
    out: W,
    format: NumberFormat,
    precision: u32,
    files: Vec<JsonFile>,
    failures: Vec<FileFailure>,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W, config: &StatsConfig) -> Self {
        Self {
            out,
            format: config.number_format,
            precision: config.precision,
            files: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<W: Write> ReportWriter for JsonReport<W> {
    fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_file(&mut self, stats: &FileStatistics) -> Result<()> {
        let columns = stats
            .columns
            .iter()
            .map(|column| JsonColumn {
                index: column.index,
                label: column.label.clone(),
                statistics: column
                    .record()
                    .map(|record| JsonStatistics::new(record, &self.format)),
            })
            .collect();

        self.files.push(JsonFile {
            file: stats.file_name.clone(),
            columns,
            ingest: stats.ingest.clone(),
        });
        Ok(())
    }

    fn write_failure(&mut self, failure: &FileFailure) -> Result<()> {
        self.failures.push(failure.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<()> {
        let document = JsonDocument {
            program: PROGRAM_NAME,
            version: PROGRAM_VERSION,
            generated_at: Utc::now(),
            precision_bits: self.precision,
            number_format: self.format,
            files: &self.files,
            failures: &self.failures,
            summary: JsonSummary {
                files_total: summary.files_total,
                files_processed: summary.files_processed,
                files_failed: summary.files_failed,
                columns_reported: summary.columns_reported,
                aborted: summary.aborted,
                elapsed_seconds: summary.elapsed.as_secs_f64(),
            },
        };

        serde_json::to_writer_pretty(&mut self.out, &document)
            .map_err(|e| Error::json("Failed to serialize JSON report", e))?;
        writeln!(self.out).map_err(|e| Error::io("Failed to write JSON report", e))?;
        self.out
            .flush()
            .map_err(|e| Error::io("Failed to flush JSON report", e))
    }
}
