//! Numeric extraction from noisy text
//!
//! Three modes cover the numeric columns of the export:
//! - [`NumericMode::IntegerOnly`] for counts such as votes
//! - [`NumericMode::Currency`] for money amounts
//! - [`NumericMode::Locale`] for decimal-comma scores with trailing garbage

use crate::constants::SCORE_PATTERN;
use crate::models::ParseOutcome;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static SCORE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SCORE_PATTERN).expect("score pattern is valid"));

/// How a raw string is reduced to a number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericMode {
    /// Keep digits only and parse an integer
    IntegerOnly,
    /// Keep digits and decimal points and parse a float
    Currency,
    /// Turn commas into points and take the first decimal number
    Locale,
}

/// A number produced by [`extract_number`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(u64),
    Decimal(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Integer(n) => n as f64,
            Number::Decimal(n) => n,
        }
    }
}

/// Extract a number from `raw` using `mode`
pub fn extract_number(raw: &str, mode: NumericMode) -> ParseOutcome<Number> {
    match mode {
        NumericMode::IntegerOnly => extract_integer(raw).map(Number::Integer),
        NumericMode::Currency => extract_currency(raw).map(Number::Decimal),
        NumericMode::Locale => extract_score(raw).map(Number::Decimal),
    }
}

/// Strip everything but ASCII digits and parse the rest as an integer
pub fn extract_integer(raw: &str) -> ParseOutcome<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return ParseOutcome::failed(raw);
    }

    match digits.parse::<u64>() {
        Ok(value) => ParseOutcome::Parsed(value),
        Err(e) => {
            debug!("Integer '{}' from '{}' out of range: {}", digits, raw, e);
            ParseOutcome::failed(raw)
        }
    }
}

/// Strip everything but digits and decimal points and parse a float.
///
/// More than one decimal point left after stripping is a failure; the
/// intended value cannot be known.
pub fn extract_currency(raw: &str) -> ParseOutcome<f64> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if kept.matches('.').count() > 1 {
        debug!("Currency '{}' has several decimal points", raw);
        return ParseOutcome::failed(raw);
    }

    parse_finite(&kept).map_or_else(|| ParseOutcome::failed(raw), ParseOutcome::Parsed)
}

/// Repair decimal commas and take the first number, dropping trailing garbage
pub fn extract_score(raw: &str) -> ParseOutcome<f64> {
    let repaired = raw.replace(',', ".");
    SCORE_NUMBER
        .find(&repaired)
        .and_then(|m| parse_finite(m.as_str()))
        .map_or_else(|| ParseOutcome::failed(raw), ParseOutcome::Parsed)
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_strips_symbols_and_separators() {
        assert_eq!(extract_currency("$1,234.56 USD"), ParseOutcome::Parsed(1234.56));
        assert_eq!(extract_currency("$28815245"), ParseOutcome::Parsed(28815245.0));
        assert_eq!(extract_currency("1234.56"), ParseOutcome::Parsed(1234.56));
    }

    #[test]
    fn test_currency_without_digits_fails() {
        assert_eq!(extract_currency("—"), ParseOutcome::failed("—"));
        assert_eq!(extract_currency(""), ParseOutcome::failed(""));
        assert!(extract_currency("$.").is_failed());
    }

    #[test]
    fn test_currency_with_several_points_fails() {
        assert_eq!(extract_currency("1.234.567"), ParseOutcome::failed("1.234.567"));
        assert!(extract_currency("$ 12.5o.1").is_failed());
    }

    #[test]
    fn test_integer_keeps_digits_only() {
        assert_eq!(extract_integer("2,345,678 votes"), ParseOutcome::Parsed(2345678));
        assert_eq!(extract_integer("1.572.674"), ParseOutcome::Parsed(1572674));
        assert_eq!(extract_integer("0"), ParseOutcome::Parsed(0));
        assert!(extract_integer("none").is_failed());
        assert!(extract_integer("99999999999999999999999").is_failed());
    }

    #[test]
    fn test_score_locale_repairs() {
        assert_eq!(extract_score("8,5"), ParseOutcome::Parsed(8.5));
        assert_eq!(extract_score("7.2x"), ParseOutcome::Parsed(7.2));
        assert_eq!(extract_score("9."), ParseOutcome::Parsed(9.0));
        assert_eq!(extract_score("++8.1"), ParseOutcome::Parsed(8.1));
        assert_eq!(extract_score("n/a"), ParseOutcome::failed("n/a"));
    }

    #[test]
    fn test_extract_number_dispatches_by_mode() {
        assert_eq!(
            extract_number("1,000", NumericMode::IntegerOnly),
            ParseOutcome::Parsed(Number::Integer(1000))
        );
        assert_eq!(
            extract_number("1,000", NumericMode::Locale),
            ParseOutcome::Parsed(Number::Decimal(1.0))
        );
        assert_eq!(
            extract_number("$1,000", NumericMode::Currency).map(Number::as_f64),
            ParseOutcome::Parsed(1000.0)
        );
        assert!(extract_number("-", NumericMode::Currency).is_failed());
    }
}
