//! Configuration management and validation.
//!
//! Provides the configuration value that is threaded into the value parser,
//! the column aggregator, the CSV reader and the report writers. Nothing in
//! the library reads ambient program-wide settings.

use crate::app::services::report::NumberFormat;
use crate::constants::{
    DEFAULT_COMMENT_MARKER, DEFAULT_DELIMITER, DEFAULT_PRECISION_BITS, DEFAULT_SKIP_LINES,
    MAX_PRECISION_BITS, MIN_PRECISION_BITS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings for one statistics run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Significand width in bits for every arbitrary-precision value
    pub precision: u32,

    /// Treat the first non-skipped row of each file as column labels
    pub has_header: bool,

    /// Lines dropped unconditionally at the start of each file
    pub skip_lines: usize,

    /// Rows whose first trimmed field starts with this are comments
    pub comment_marker: char,

    /// Field delimiter
    pub delimiter: char,

    /// How numbers are rendered in reports
    pub number_format: NumberFormat,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION_BITS,
            has_header: false,
            skip_lines: DEFAULT_SKIP_LINES,
            comment_marker: DEFAULT_COMMENT_MARKER,
            delimiter: DEFAULT_DELIMITER,
            number_format: NumberFormat::default(),
        }
    }
}

impl StatsConfig {
    /// Create configuration with custom precision
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Enable header row handling
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Create configuration with a number of always-skipped leading lines
    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    /// Create configuration with a custom comment marker
    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    /// Create configuration with a custom field delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Configure number rendering
    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    /// Delimiter as the single byte the tokenizer needs
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii())
            .ok_or_else(|| {
                Error::configuration(format!(
                    "Delimiter must be a single ASCII character, got '{}'",
                    self.delimiter
                ))
            })
    }

    /// Comment marker as a tokenizer byte, when it fits in one
    pub fn comment_byte(&self) -> Option<u8> {
        u8::try_from(self.comment_marker)
            .ok()
            .filter(|b| b.is_ascii())
    }

    /// Validate settings for consistency
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PRECISION_BITS..=MAX_PRECISION_BITS).contains(&self.precision) {
            return Err(Error::configuration(format!(
                "Precision must be between {} and {} bits, got {}",
                MIN_PRECISION_BITS, MAX_PRECISION_BITS, self.precision
            )));
        }

        let delimiter = self.delimiter_byte()?;
        if matches!(delimiter, b'"' | b'\n' | b'\r') {
            return Err(Error::configuration(format!(
                "Delimiter cannot be {:?}",
                self.delimiter
            )));
        }

        if self.comment_marker.is_whitespace() {
            return Err(Error::configuration(
                "Comment marker cannot be whitespace".to_string(),
            ));
        }

        if self.comment_marker == self.delimiter {
            return Err(Error::configuration(format!(
                "Comment marker and delimiter are both '{}'",
                self.delimiter
            )));
        }

        self.number_format.validate()?;

        debug!("Validated configuration: {:?}", self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::report::Notation;

    #[test]
    fn test_default_config_is_valid() {
        let config = StatsConfig::default();
        assert_eq!(config.precision, 256);
        assert!(!config.has_header);
        assert_eq!(config.skip_lines, 0);
        assert_eq!(config.comment_marker, '#');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = StatsConfig::default()
            .with_precision(512)
            .with_header(true)
            .with_skip_lines(3)
            .with_delimiter(';')
            .with_comment_marker('%')
            .with_number_format(NumberFormat::new(Some(12), Notation::Scientific));

        assert_eq!(config.precision, 512);
        assert!(config.has_header);
        assert_eq!(config.skip_lines, 3);
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert_eq!(config.comment_byte(), Some(b'%'));
        assert_eq!(config.number_format.digits, Some(12));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precision_out_of_range() {
        assert!(StatsConfig::default().with_precision(8).validate().is_err());
        assert!(StatsConfig::default().with_precision(4096).validate().is_err());
        assert!(StatsConfig::default().with_precision(16).validate().is_ok());
        assert!(StatsConfig::default().with_precision(1024).validate().is_ok());
    }

    #[test]
    fn test_invalid_delimiters() {
        assert!(StatsConfig::default().with_delimiter('"').validate().is_err());
        assert!(StatsConfig::default().with_delimiter('§').validate().is_err());
        assert!(StatsConfig::default().with_delimiter('#').validate().is_err());
        assert!(StatsConfig::default().with_delimiter('\t').validate().is_ok());
    }

    #[test]
    fn test_non_ascii_comment_marker_has_no_tokenizer_byte() {
        let config = StatsConfig::default().with_comment_marker('¶');
        assert_eq!(config.comment_byte(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = StatsConfig::default().with_header(true).with_precision(128);
        let json = serde_json::to_string(&config).unwrap();
        let back: StatsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
