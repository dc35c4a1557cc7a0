//! Command-line argument definitions for bfbs
//!
//! This module defines the complete CLI interface using the clap derive API
//! and converts parsed arguments into a [`StatsConfig`].

use crate::app::services::report::{Notation, NumberFormat, OutputFormat};
use crate::config::StatsConfig;
use crate::constants::{
    DEFAULT_COMMENT_MARKER, DEFAULT_DELIMITER, DEFAULT_PRECISION_BITS, DEFAULT_SKIP_LINES,
};
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the bfbs statistics tool
///
/// Computes descriptive statistics for every numeric column of one or more
/// delimited text files using arbitrary-precision arithmetic.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bfbs",
    version,
    about = "Big-float basic statistics for every column of delimited text files",
    long_about = "Reads CSV-style files and reports count, sum, mean, median, min, max, range, \
                  variance, standard deviation, skewness and excess kurtosis for every column. \
                  All arithmetic uses MPFR floating point at a configurable precision, so sums \
                  of millions of values or values of very different magnitudes keep their \
                  significant digits."
)]
pub struct Args {
    /// Input files, directories or glob patterns
    ///
    /// Directories are searched recursively for .csv files. Glob patterns are
    /// expanded here for shells that pass them through unexpanded.
    #[arg(
        value_name = "INPUT",
        required = true,
        num_args = 1..,
        help = "Input files, directories or glob patterns"
    )]
    pub inputs: Vec<String>,

    /// Treat the first non-comment, non-blank row as column labels
    #[arg(
        short = 'H',
        long = "header",
        help = "First non-comment row holds column labels"
    )]
    pub header: bool,

    /// Number of leading lines dropped before anything else is read
    ///
    /// Skipped lines are never classified, so they may hold free text,
    /// unbalanced quotes or bytes that are not UTF-8.
    #[arg(
        short = 's',
        long = "skip",
        value_name = "N",
        default_value_t = DEFAULT_SKIP_LINES,
        help = "Number of leading lines to skip"
    )]
    pub skip: usize,

    /// Comment marker
    ///
    /// A row whose first field starts with this character (after trimming)
    /// is ignored.
    #[arg(
        short = 'c',
        long = "comment-char",
        value_name = "CHAR",
        default_value_t = DEFAULT_COMMENT_MARKER,
        value_parser = parse_char_arg,
        help = "Comment marker character"
    )]
    pub comment_char: char,

    /// Field delimiter (`tab` or `\t` for tab-separated input)
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "CHAR",
        default_value_t = DEFAULT_DELIMITER,
        value_parser = parse_char_arg,
        help = "Field delimiter character"
    )]
    pub delimiter: char,

    /// Significand width in bits for all arithmetic
    #[arg(
        short = 'P',
        long = "precision",
        value_name = "BITS",
        default_value_t = DEFAULT_PRECISION_BITS,
        help = "Floating point precision in bits (16-1024)"
    )]
    pub precision: u32,

    /// Significant digits shown in reports
    ///
    /// When omitted, every digit the precision carries is shown.
    #[arg(
        short = 'D',
        long = "digits",
        value_name = "N",
        help = "Significant digits to display"
    )]
    pub digits: Option<usize>,

    /// Number notation in reports
    #[arg(
        short = 'n',
        long = "notation",
        value_enum,
        default_value = "shortest",
        help = "Number notation for reported values"
    )]
    pub notation: Notation,

    /// Report format
    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Report destination
    ///
    /// If not specified, the report is written to stdout.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Write the report to FILE instead of stdout"
    )]
    pub output_file: Option<PathBuf>,

    /// Stop at the first file that cannot be processed
    ///
    /// Results for files already finished are still reported.
    #[arg(long = "fail-fast", help = "Stop at the first file that fails")]
    pub fail_fast: bool,

    /// Show a progress bar over input files
    #[arg(long = "progress", help = "Show a progress bar on stderr")]
    pub progress: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Parse a single-character argument, accepting `tab` and `\t` for a tab
fn parse_char_arg(s: &str) -> std::result::Result<char, String> {
    match s {
        "tab" | "\\t" => return Ok('\t'),
        _ => {}
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got '{}'", s)),
    }
}

impl Args {
    /// Validate arguments that do not end up in [`StatsConfig`]
    ///
    /// Settings carried by the configuration are checked by
    /// [`StatsConfig::validate`] through [`Args::to_config`].
    pub fn validate(&self) -> Result<()> {
        // Validate output file directory exists if specified
        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Build the run configuration
    pub fn to_config(&self) -> Result<StatsConfig> {
        let config = StatsConfig::default()
            .with_precision(self.precision)
            .with_header(self.header)
            .with_skip_lines(self.skip)
            .with_comment_marker(self.comment_char)
            .with_delimiter(self.delimiter)
            .with_number_format(NumberFormat::new(self.digits, self.notation));

        config.validate()?;
        Ok(config)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show a progress bar
    pub fn show_progress(&self) -> bool {
        self.progress && !self.quiet
    }
}
