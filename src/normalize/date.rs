//! Release date recovery
//!
//! Raw dates arrive in mixed locale conventions. After a light pre-clean the
//! value goes through a [`Cascade`]:
//! 1. day-first flexible parse (ISO year-first, numeric day-first with four- or
//!    two-digit years, month names)
//! 2. strict `MM DD YYYY`, which the day-first parse rejects
//!
//! A value no strategy accepts becomes a failure carrying the cleaned string.

use super::{Cascade, Strategy};
use crate::constants::{
    DAY_FIRST_FORMATS, DAY_FIRST_SHORT_YEAR_FORMATS, LEADING_YEAR_PATTERN,
    MONTH_FIRST_STRICT_FORMAT, MONTH_NAME_FORMATS, TRAILING_YEAR_PATTERN, YEAR_FIRST_FORMATS,
};
use crate::models::ParseOutcome;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static DASH_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").expect("dash pattern is valid"));
static WHITESPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static LEADING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LEADING_YEAR_PATTERN).expect("leading year pattern is valid"));
static TRAILING_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TRAILING_YEAR_PATTERN).expect("trailing year pattern is valid"));

static DATE_STRATEGIES: [(&str, Strategy<NaiveDate>); 2] = [
    ("day_first_flexible", parse_day_first_flexible),
    ("month_day_year_strict", parse_month_first_strict),
];

static DATE_CASCADE: Cascade<NaiveDate> = Cascade::new(&DATE_STRATEGIES);

/// Normalize a raw release date into a calendar date
pub fn normalize_date(raw: &str) -> ParseOutcome<NaiveDate> {
    let cleaned = pre_clean(raw);
    let outcome = DATE_CASCADE.run(&cleaned);
    if let Some(failed) = outcome.raw() {
        debug!("No date strategy accepted '{}'", failed);
    }
    outcome
}

/// Trim, collapse dash runs and collapse whitespace runs
pub fn pre_clean(raw: &str) -> String {
    let trimmed = raw.trim();
    let dashes = DASH_RUNS.replace_all(trimmed, "-");
    WHITESPACE_RUNS.replace_all(&dashes, " ").into_owned()
}

/// Day-first parse across common separators and month-name layouts.
///
/// Ambiguous numeric input resolves day-first, including two-digit years;
/// month-first input is only accepted by the strict strategy.
fn parse_day_first_flexible(value: &str) -> ParseOutcome<NaiveDate> {
    YEAR_FIRST_FORMATS
        .iter()
        .chain(DAY_FIRST_FORMATS)
        .chain(DAY_FIRST_SHORT_YEAR_FORMATS)
        .chain(MONTH_NAME_FORMATS)
        .find_map(|format| parse_with_format(value, format))
        .map_or_else(|| ParseOutcome::failed(value), ParseOutcome::Parsed)
}

fn parse_month_first_strict(value: &str) -> ParseOutcome<NaiveDate> {
    parse_with_format(value, MONTH_FIRST_STRICT_FORMAT)
        .map_or_else(|| ParseOutcome::failed(value), ParseOutcome::Parsed)
}

/// A `%Y` layout only applies when the year it would read has four digits
fn has_full_year(value: &str, format: &str) -> bool {
    if format.starts_with("%Y") {
        LEADING_YEAR.is_match(value)
    } else if format.contains("%Y") {
        TRAILING_YEAR.is_match(value)
    } else {
        true
    }
}

fn parse_with_format(value: &str, format: &str) -> Option<NaiveDate> {
    if !has_full_year(value, format) {
        return None;
    }
    if format.contains("%H") {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|dt| dt.date())
    } else {
        NaiveDate::parse_from_str(value, format).ok()
    }
}
