//! CSV report: one row per column with data

use std::io::Write;

use tracing::debug;

use super::{FileFailure, NumberFormat, ReportWriter, RunSummary};
use crate::Result;
use crate::app::models::FileStatistics;
use crate::config::StatsConfig;
use crate::constants::CSV_REPORT_HEADERS;

/// Tabular report written with `csv::Writer`
///
/// Columns without values and failed files produce no rows; they are
/// visible in the log instead.
pub struct CsvReport<W: Write> {
    writer: csv::Writer<W>,
    format: NumberFormat,
}

impl<W: Write> CsvReport<W> {
    pub fn new(out: W, config: &StatsConfig) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
            format: config.number_format,
        }
    }
}

impl<W: Write> ReportWriter for CsvReport<W> {
    fn begin(&mut self) -> Result<()> {
        self.writer.write_record(CSV_REPORT_HEADERS)?;
        Ok(())
    }

    fn write_file(&mut self, stats: &FileStatistics) -> Result<()> {
        let fmt = self.format;

        for column in &stats.columns {
            let Some(record) = column.record() else {
                debug!("{}: no row for empty column {}", stats.file_name, column.label);
                continue;
            };

            self.writer.write_record([
                stats.file_name.clone(),
                column.label.clone(),
                record.count.to_string(),
                fmt.format(&record.min),
                fmt.format(&record.mean),
                fmt.format(&record.median),
                fmt.format(&record.max),
                fmt.format(&record.range),
                fmt.format(&record.sum),
                fmt.format(&record.sample_variance),
                fmt.format(&record.sample_std_dev),
                fmt.format(&record.skewness),
                fmt.format(&record.kurtosis),
            ])?;
        }

        Ok(())
    }

    fn write_failure(&mut self, failure: &FileFailure) -> Result<()> {
        debug!("CSV report omits failed file {}", failure.file);
        Ok(())
    }

    fn finish(&mut self, _summary: &RunSummary) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| crate::Error::io("Failed to flush CSV report", e))
    }
}
