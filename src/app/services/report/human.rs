//! Human-readable terminal report

use std::io::Write;

use colored::*;
use indicatif::HumanDuration;

use super::{FileFailure, NumberFormat, ReportWriter, RunSummary};
use crate::app::models::{ColumnOutcome, FileStatistics, StatisticsRecord};
use crate::config::StatsConfig;
use crate::constants::{PROGRAM_NAME, PROGRAM_VERSION};
use crate::{Error, Result};

const LABEL_WIDTH: usize = 16;

/// Labelled per-column blocks, one file after another
pub struct HumanReport<W: Write> {
    out: W,
    format: NumberFormat,
    precision: u32,
}

impl<W: Write> HumanReport<W> {
    pub fn new(out: W, config: &StatsConfig) -> Self {
        Self {
            out,
            format: config.number_format,
            precision: config.precision,
        }
    }

    fn line(&mut self, label: &str, value: &str) -> Result<()> {
        writeln!(self.out, "    {:<width$}: {}", label, value, width = LABEL_WIDTH)
            .map_err(|e| Error::io("Failed to write report", e))
    }

    fn write_record(&mut self, record: &StatisticsRecord) -> Result<()> {
        let fmt = self.format;

        self.line("Count", &record.count.to_string())?;
        self.line("Minimum", &fmt.format(&record.min))?;
        self.line("Mean", &fmt.format(&record.mean))?;
        self.line("Median", &fmt.format(&record.median))?;
        self.line("Maximum", &fmt.format(&record.max))?;
        self.line("Range", &fmt.format(&record.range))?;
        self.line("Sum", &fmt.format(&record.sum))?;
        self.line("Variance", &fmt.format(&record.sample_variance))?;
        self.line("Std. Dev.", &fmt.format(&record.sample_std_dev))?;
        self.line("Pop. Variance", &fmt.format(&record.population_variance))?;
        self.line("Pop. Std. Dev.", &fmt.format(&record.population_std_dev))?;
        self.line(
            "Skewness",
            &format!(
                "{} (f64: {})",
                fmt.format(&record.skewness),
                record.skewness_f64
            ),
        )?;
        self.line(
            "Kurtosis",
            &format!(
                "{} (f64: {})",
                fmt.format(&record.kurtosis),
                record.kurtosis_f64
            ),
        )
    }
}

impl<W: Write> ReportWriter for HumanReport<W> {
    fn begin(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "{} {} (precision: {} bits)",
            PROGRAM_NAME.bright_green().bold(),
            PROGRAM_VERSION,
            self.precision
        )
        .map_err(|e| Error::io("Failed to write report", e))
    }

    fn write_file(&mut self, stats: &FileStatistics) -> Result<()> {
        writeln!(self.out, "\n{} {}", "File:".bold(), stats.file_name)
            .map_err(|e| Error::io("Failed to write report", e))?;

        for column in &stats.columns {
            writeln!(self.out, "  {}", column.label.bright_white().bold())
                .map_err(|e| Error::io("Failed to write report", e))?;

            match &column.outcome {
                ColumnOutcome::Statistics(record) => self.write_record(record)?,
                ColumnOutcome::NoData => {
                    writeln!(self.out, "    No valid data")
                        .map_err(|e| Error::io("Failed to write report", e))?;
                }
            }
        }

        let ingest = &stats.ingest;
        writeln!(
            self.out,
            "  Rows: {} read, {} skipped, {} data; values: {} parsed, {} missing, {} invalid",
            ingest.rows_read,
            ingest.rows_skipped,
            ingest.data_rows,
            ingest.values_parsed,
            ingest.missing_values,
            ingest.invalid_values
        )
        .map_err(|e| Error::io("Failed to write report", e))?;

        if ingest.unreadable_rows > 0 {
            writeln!(
                self.out,
                "  {} {} unreadable rows skipped",
                "Warning:".bright_yellow(),
                ingest.unreadable_rows
            )
            .map_err(|e| Error::io("Failed to write report", e))?;
        }

        Ok(())
    }

    fn write_failure(&mut self, failure: &FileFailure) -> Result<()> {
        writeln!(
            self.out,
            "\n{} {}: {}",
            "Failed:".bright_red().bold(),
            failure.file,
            failure.error
        )
        .map_err(|e| Error::io("Failed to write report", e))
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<()> {
        writeln!(self.out, "\n{}", "Summary".bright_green().bold())
            .map_err(|e| Error::io("Failed to write report", e))?;
        writeln!(
            self.out,
            "  Files processed : {} of {}",
            summary.files_processed, summary.files_total
        )
        .map_err(|e| Error::io("Failed to write report", e))?;

        if summary.files_failed > 0 {
            writeln!(
                self.out,
                "  Files failed    : {}",
                summary.files_failed.to_string().bright_red().bold()
            )
            .map_err(|e| Error::io("Failed to write report", e))?;
        }
        if summary.aborted {
            writeln!(self.out, "  Run aborted after first failure")
                .map_err(|e| Error::io("Failed to write report", e))?;
        }

        writeln!(
            self.out,
            "  Columns reported: {}",
            summary.columns_reported
        )
        .map_err(|e| Error::io("Failed to write report", e))?;
        writeln!(
            self.out,
            "  Execution time  : {}",
            HumanDuration(summary.elapsed)
        )
        .map_err(|e| Error::io("Failed to write report", e))?;

        self.out
            .flush()
            .map_err(|e| Error::io("Failed to flush report", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CsvStatsReader;

    fn render(input: &str, config: StatsConfig) -> String {
        let stats = CsvStatsReader::new(config.clone())
            .unwrap()
            .process_reader("data.csv", input.as_bytes())
            .unwrap();

        let mut buffer = Vec::new();
        let mut report = HumanReport::new(&mut buffer, &config);
        report.begin().unwrap();
        report.write_file(&stats).unwrap();
        report
            .finish(&RunSummary {
                files_total: 1,
                files_processed: 1,
                columns_reported: stats.columns_with_data(),
                ..Default::default()
            })
            .unwrap();

        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_column_block_lines() {
        let text = render("1,2\n3,4\n5,6\n", StatsConfig::default());

        assert!(text.contains("precision: 256 bits"));
        assert!(text.contains("data.csv"));
        assert!(text.contains("Column 1"));
        assert!(text.contains("Column 2"));
        assert!(text.contains(&format!("    {:<16}: 3", "Count")));
        assert!(text.contains(&format!("    {:<16}: 9", "Sum")));
        assert!(text.contains(&format!("    {:<16}: 4", "Mean")));
        assert!(text.contains(&format!("    {:<16}: 4", "Variance")));
        assert!(text.contains("Execution time"));
    }

    #[test]
    fn test_no_data_column() {
        let config = StatsConfig::default().with_header(true);
        let text = render("a,b\n1,\n2,\n", config);

        assert!(text.contains("No valid data"));
        assert_eq!(text.matches("No valid data").count(), 1);
    }

    #[test]
    fn test_failure_and_summary() {
        let mut buffer = Vec::new();
        let mut report = HumanReport::new(&mut buffer, &StatsConfig::default());
        report
            .write_failure(&FileFailure::new("gone.csv", "Cannot open file"))
            .unwrap();
        report
            .finish(&RunSummary {
                files_total: 1,
                files_failed: 1,
                ..Default::default()
            })
            .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("gone.csv: Cannot open file"));
        assert!(text.contains("Files processed : 0 of 1"));
        assert!(text.contains("Files failed"));
    }
}
