//! Locale-free short formatting and parsing.
//!
//! Values below one thousand print with two decimals and no suffix. Larger
//! values use one suffix per power of one thousand until the table runs out,
//! after which scientific notation (`1.23e45`) takes over. [`str::parse`]
//! accepts every shape the formatter produces.

use core::fmt;
use core::str::FromStr;

use super::ExtendedNumber;

/// Magnitude suffixes, one per power of one thousand.
pub const SUFFIXES: [&str; 12] = [
    "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "Dc",
];

/// Errors raised when parsing a formatted number.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NumberParseError {
    #[error("empty number")]
    Empty,

    #[error("invalid mantissa: {0}")]
    InvalidMantissa(String),

    #[error("invalid exponent: {0}")]
    InvalidExponent(String),

    #[error("unknown magnitude suffix: {0}")]
    UnknownSuffix(String),

    #[error("number is not finite")]
    NonFinite,
}

impl ExtendedNumber {
    /// Formats the value in short form, e.g. `999.00`, `1.23M`, `4.56e40`.
    pub fn to_short_string(&self) -> String {
        if self.is_negative() {
            return format!("-{}", self.abs().to_short_string());
        }
        if self.exponent < 3 {
            return format!("{:.2}", self.to_f64());
        }

        let mut tier = (self.exponent / 3) as usize;
        if tier < SUFFIXES.len() {
            let mut value = round_cents(self.mantissa * 10f64.powi((self.exponent % 3) as i32));
            if value >= 1000.0 {
                value /= 1000.0;
                tier += 1;
            }
            if tier < SUFFIXES.len() {
                return format!("{:.2}{}", value, SUFFIXES[tier]);
            }
        }

        let mut mantissa = round_cents(self.mantissa);
        let mut exponent = self.exponent;
        if mantissa >= 10.0 {
            mantissa /= 10.0;
            exponent += 1;
        }
        format!("{:.2}e{}", mantissa, exponent)
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl fmt::Display for ExtendedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_short_string())
    }
}

impl FromStr for ExtendedNumber {
    type Err = NumberParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(NumberParseError::Empty);
        }

        if let Some(position) = text.rfind(['e', 'E']) {
            let (mantissa, exponent) = (&text[..position], &text[position + 1..]);
            let mantissa = parse_mantissa(mantissa)?;
            let exponent = exponent
                .parse::<i64>()
                .map_err(|_| NumberParseError::InvalidExponent(exponent.to_string()))?;
            return ExtendedNumber::try_from_parts(mantissa, exponent);
        }

        let split = text
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_alphabetic())
            .last()
            .map_or(text.len(), |(index, _)| index);
        let (number, suffix) = text.split_at(split);

        let tier = SUFFIXES
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(suffix))
            .ok_or_else(|| NumberParseError::UnknownSuffix(suffix.to_string()))?;

        ExtendedNumber::try_from_parts(parse_mantissa(number)?, 3 * tier as i64)
    }
}

fn parse_mantissa(text: &str) -> Result<f64, NumberParseError> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| NumberParseError::InvalidMantissa(text.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberParseError::NonFinite)
    }
}
