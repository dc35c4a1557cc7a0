//! Decimal rendering of arbitrary-precision values
//!
//! Values are converted once with MPFR to a digit string and a decimal
//! exponent (`0.ddd × 10^exp`), then laid out as fixed, scientific or
//! shortest notation by pure string functions.

use clap::ValueEnum;
use rug::Float;
use serde::{Deserialize, Serialize};

use crate::constants::{SHORTEST_MAX_FIXED_EXPONENT, SHORTEST_MIN_FIXED_EXPONENT};
use crate::{Error, Result};

/// Layout of rendered numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// Positional notation, never an exponent
    Fixed,
    /// One leading digit and an exponent, e.g. `1.25e3`
    Scientific,
    /// Fixed for moderate magnitudes, scientific otherwise; trailing zeros dropped
    #[default]
    Shortest,
}

/// How report values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Significant digits; `None` prints every digit the precision carries
    pub digits: Option<usize>,
    pub notation: Notation,
}

impl NumberFormat {
    pub fn new(digits: Option<usize>, notation: Notation) -> Self {
        Self { digits, notation }
    }

    pub fn validate(&self) -> Result<()> {
        if self.digits == Some(0) {
            return Err(Error::configuration(
                "Display digits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Render a value as decimal text
    pub fn format(&self, value: &Float) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value.is_sign_negative() { "-inf" } else { "inf" }.to_string();
        }
        if value.is_zero() {
            return render_zero(self.notation);
        }

        let (negative, digits, exp) = value.to_sign_string_exp(10, self.digits);
        render(
            negative,
            &digits,
            exp.unwrap_or(0),
            self.notation,
            self.digits.is_none(),
        )
    }
}

fn render_zero(notation: Notation) -> String {
    match notation {
        Notation::Scientific => "0e0".to_string(),
        Notation::Fixed | Notation::Shortest => "0".to_string(),
    }
}

/// Lay out `0.digits × 10^exp`
///
/// With `trim` set (no digit count requested), trailing zeros of the digit
/// string are dropped before layout. Shortest notation always trims; it
/// turns scientific at the requested digit count, or at
/// [`SHORTEST_MAX_FIXED_EXPONENT`] when every digit is printed.
pub fn render(negative: bool, digits: &str, exp: i32, notation: Notation, trim: bool) -> String {
    let fixed_limit = if trim {
        SHORTEST_MAX_FIXED_EXPONENT
    } else {
        digits.len() as i64
    };
    let trimmed = match digits.trim_end_matches('0') {
        "" => "0",
        rest => rest,
    };

    let body = match notation {
        Notation::Fixed => fixed(if trim { trimmed } else { digits }, exp),
        Notation::Scientific => scientific(if trim { trimmed } else { digits }, exp),
        Notation::Shortest => {
            let decimal_exponent = i64::from(exp) - 1;
            if decimal_exponent < SHORTEST_MIN_FIXED_EXPONENT
                || decimal_exponent >= fixed_limit
            {
                scientific(trimmed, exp)
            } else {
                fixed(trimmed, exp)
            }
        }
    };

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

fn fixed(digits: &str, exp: i32) -> String {
    let len = digits.len() as i64;
    let exp = i64::from(exp);

    if exp <= 0 {
        format!("0.{}{}", "0".repeat(exp.unsigned_abs() as usize), digits)
    } else if exp >= len {
        format!("{}{}", digits, "0".repeat((exp - len) as usize))
    } else {
        let (int_part, frac_part) = digits.split_at(exp as usize);
        format!("{}.{}", int_part, frac_part)
    }
}

fn scientific(digits: &str, exp: i32) -> String {
    let (lead, rest) = digits.split_at(1);
    let decimal_exponent = i64::from(exp) - 1;

    if rest.is_empty() {
        format!("{}e{}", lead, decimal_exponent)
    } else {
        format!("{}.{}e{}", lead, rest, decimal_exponent)
    }
}
