//! Text field to arbitrary-precision number conversion
//!
//! Fields are trimmed, then parsed as decimal floating point and rounded to
//! the configured precision with round-to-nearest-even. An empty field is a
//! missing value, not an error. Interior whitespace and digit-group
//! underscores are rejected; MPFR's grammar would otherwise drop them.

use rug::Float;
use rug::float::Round;

use crate::{Error, Result};

/// Why a non-empty field was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueParseError {
    #[error("not a decimal number")]
    NotANumber,
    #[error("not a finite number")]
    NonFinite,
}

/// Where a field came from, for diagnostics
#[derive(Debug, Clone, Copy)]
pub struct FieldLocation<'a> {
    pub file: &'a str,
    /// Physical line number in the file (one-based)
    pub row: usize,
    /// Zero-based column index
    pub column: usize,
}

/// Parses fields at a fixed precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueParser {
    precision: u32,
}

impl ValueParser {
    /// Create a parser producing values of `precision` bits
    pub fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// Precision of produced values (bits)
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Parse a raw field; `Ok(None)` when it is empty after trimming
    pub fn parse(&self, raw: &str) -> std::result::Result<Option<Float>, ValueParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if trimmed
            .bytes()
            .any(|b| b.is_ascii_whitespace() || b == b'_')
        {
            return Err(ValueParseError::NotANumber);
        }

        let incomplete = Float::parse(trimmed).map_err(|_| ValueParseError::NotANumber)?;
        let (value, _) = Float::with_val_round(self.precision, incomplete, Round::Nearest);

        if !value.is_finite() {
            return Err(ValueParseError::NonFinite);
        }

        Ok(Some(value))
    }

    /// Parse a raw field, reporting failure as [`Error::InvalidValue`]
    pub fn parse_at(&self, raw: &str, location: FieldLocation<'_>) -> Result<Option<Float>> {
        self.parse(raw).map_err(|e| {
            Error::invalid_value(
                location.file,
                location.row,
                location.column + 1,
                raw,
                e.to_string(),
            )
        })
    }
}
