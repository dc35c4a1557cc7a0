//! Per-file reading and record dispatch
//!
//! Structural failures (the file cannot be opened, a pre-skipped line or the
//! header cannot be read) end the file with an error. Once the header is
//! established, a record that cannot be decoded is logged and skipped, and
//! an I/O failure stops reading but keeps what was accumulated.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::app::models::FileStatistics;
use crate::app::services::column_aggregator::ColumnAggregator;
use crate::config::StatsConfig;
use crate::{Error, Result};

/// Reads delimited files and reduces each to per-column statistics
#[derive(Debug, Clone)]
pub struct CsvStatsReader {
    config: StatsConfig,
    delimiter: u8,
}

impl CsvStatsReader {
    /// Create a reader after validating the configuration
    pub fn new(config: StatsConfig) -> Result<Self> {
        config.validate()?;
        let delimiter = config.delimiter_byte()?;
        Ok(Self { config, delimiter })
    }

    /// Configuration in use
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Open and process one file
    pub fn process_file(&self, path: &Path) -> Result<FileStatistics> {
        let file_name = path.display().to_string();
        info!("Processing file: {}", file_name);

        let file = File::open(path).map_err(|e| Error::file_unavailable(&file_name, e))?;
        self.process_reader(&file_name, file)
    }

    /// Process any byte source as one file named `file_name`
    pub fn process_reader<R: Read>(&self, file_name: &str, source: R) -> Result<FileStatistics> {
        let mut buffered = BufReader::new(source);
        let skipped = skip_leading_lines(&mut buffered, self.config.skip_lines, file_name)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .comment(self.config.comment_byte())
            .from_reader(buffered);

        let mut aggregator = ColumnAggregator::new(file_name, &self.config);
        let mut record = csv::StringRecord::new();
        let mut line = csv_reader.position().line();

        loop {
            let header_expected = aggregator.awaiting_header();
            let start_line = line;

            let result = csv_reader.read_record(&mut record);

            // Blank lines, and comment lines when the marker is a tokenizer
            // byte, are consumed without producing a record.
            line = csv_reader.position().line();
            let consumed = line.saturating_sub(start_line) as usize;

            match result {
                Ok(false) => {
                    aggregator.note_dropped_rows(consumed);
                    break;
                }
                Ok(true) => {
                    let dropped = consumed.saturating_sub(record_line_count(&record));
                    aggregator.note_dropped_rows(dropped);

                    let row = skipped + start_line as usize + dropped;
                    let fields: Vec<&str> = record.iter().collect();
                    aggregator.push_row(&fields, row);
                }
                Err(e) => {
                    let dropped = consumed.saturating_sub(1);
                    aggregator.note_dropped_rows(dropped);
                    let row = skipped + start_line as usize + dropped;

                    if header_expected {
                        return Err(Error::malformed_skip_or_header_line(
                            file_name,
                            row,
                            format!("header row unreadable: {}", e),
                        ));
                    }

                    if e.is_io_error() {
                        warn!(
                            "Stopped reading {} after row {}: {}",
                            file_name, row, e
                        );
                        break;
                    }

                    aggregator.note_unreadable_row(row, &e.to_string());
                }
            }
        }

        let stats = aggregator.finalize();
        debug!(
            "{}: {} rows read, {} data rows, {} values, {} invalid",
            file_name,
            stats.ingest.rows_read,
            stats.ingest.data_rows,
            stats.ingest.values_parsed,
            stats.ingest.invalid_values
        );

        Ok(stats)
    }
}

/// Physical lines spanned by a record (quoted fields may contain newlines)
fn record_line_count(record: &csv::StringRecord) -> usize {
    1 + record.iter().map(|field| field.matches('\n').count()).sum::<usize>()
}

/// Drop up to `count` lines; returns how many were dropped
///
/// Lines are read as raw bytes so that skipped preambles need not be valid
/// UTF-8. Reaching end of input early is not an error.
fn skip_leading_lines<R: BufRead>(reader: &mut R, count: usize, file_name: &str) -> Result<usize> {
    let mut line = Vec::new();

    for skipped in 0..count {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => {
                debug!("{}: input ended after {} skipped lines", file_name, skipped);
                return Ok(skipped);
            }
            Ok(_) => {}
            Err(e) => {
                return Err(Error::malformed_skip_or_header_line(
                    file_name,
                    skipped + 1,
                    format!("skip line unreadable: {}", e),
                ));
            }
        }
    }

    Ok(count)
}
