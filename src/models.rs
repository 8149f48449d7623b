//! Core data structures for the cleaning pipeline.
//!
//! Defines the fixed schema, row identity, the raw and cleaned row shapes
//! and the tagged [`ParseOutcome`] shared by every normalizer.

use crate::constants::{CANONICAL_DATE_FORMAT, COLUMN_NAMES, MISSING_VALUE, SCHEMA_WIDTH};
use crate::error::{CleanerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// =============================================================================
// Schema
// =============================================================================

/// Columns of the cleaned table, in source order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Column {
    Id,
    Title,
    ReleaseYear,
    Genre,
    Duration,
    Country,
    ContentRating,
    Director,
    Income,
    Votes,
    Score,
}

impl Column {
    /// All columns in positional order
    pub const ALL: [Column; SCHEMA_WIDTH] = [
        Column::Id,
        Column::Title,
        Column::ReleaseYear,
        Column::Genre,
        Column::Duration,
        Column::Country,
        Column::ContentRating,
        Column::Director,
        Column::Income,
        Column::Votes,
        Column::Score,
    ];

    /// Position of the column in a split row
    pub fn index(self) -> usize {
        self as usize
    }

    /// Schema name of the column
    pub fn name(self) -> &'static str {
        COLUMN_NAMES[self.index()]
    }

    /// Whether values of this column have a natural order usable by aggregations
    pub fn is_orderable(self) -> bool {
        matches!(
            self,
            Column::ReleaseYear | Column::Income | Column::Votes | Column::Score
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = CleanerError;

    fn from_str(s: &str) -> Result<Self> {
        Column::ALL
            .into_iter()
            .find(|column| column.name() == s)
            .ok_or_else(|| CleanerError::UnknownColumn {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for Column {
    type Error = CleanerError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Column> for String {
    fn from(column: Column) -> Self {
        column.name().to_string()
    }
}

// =============================================================================
// Row Identity
// =============================================================================

/// Stable identity of a data line, assigned once at split time.
///
/// The value is the zero-based index of the line among the data lines of the
/// export and survives every later drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub usize);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Parse Outcome
// =============================================================================

/// Result of normalizing one raw field
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// The field produced a value
    Parsed(T),
    /// No strategy produced a value; `raw` is kept for diagnostics
    Failed { raw: String },
}

impl<T> ParseOutcome<T> {
    pub fn failed(raw: impl Into<String>) -> Self {
        ParseOutcome::Failed { raw: raw.into() }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    pub fn is_failed(&self) -> bool {
        !self.is_parsed()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ParseOutcome::Parsed(value) => Some(value),
            ParseOutcome::Failed { .. } => None,
        }
    }

    /// Raw input of a failed outcome
    pub fn raw(&self) -> Option<&str> {
        match self {
            ParseOutcome::Parsed(_) => None,
            ParseOutcome::Failed { raw } => Some(raw),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            ParseOutcome::Parsed(value) => Some(value),
            ParseOutcome::Failed { .. } => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Parsed(value) => ParseOutcome::Parsed(f(value)),
            ParseOutcome::Failed { raw } => ParseOutcome::Failed { raw },
        }
    }

    /// Keep a parsed value, otherwise evaluate the next strategy
    pub fn or_else<F: FnOnce(&str) -> ParseOutcome<T>>(self, f: F) -> ParseOutcome<T> {
        match self {
            ParseOutcome::Parsed(value) => ParseOutcome::Parsed(value),
            ParseOutcome::Failed { raw } => f(&raw),
        }
    }
}

// =============================================================================
// Rows
// =============================================================================

/// One split line: exactly [`SCHEMA_WIDTH`] raw fields plus its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub id: RowId,
    fields: [String; SCHEMA_WIDTH],
}

impl RawRow {
    /// Build a row, rejecting any field count other than the schema width.
    /// The observed width is returned on rejection.
    pub fn new(id: RowId, fields: Vec<String>) -> std::result::Result<Self, usize> {
        let fields: [String; SCHEMA_WIDTH] = fields.try_into().map_err(|v: Vec<String>| v.len())?;
        Ok(Self { id, fields })
    }

    pub fn get(&self, column: Column) -> &str {
        &self.fields[column.index()]
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> [String; SCHEMA_WIDTH] {
        self.fields
    }
}

/// A row of the cleaned table with the typed fields resolved
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRow {
    pub row_id: RowId,
    pub id: String,
    pub title: String,
    pub release_yr: Option<NaiveDate>,
    pub genre: String,
    pub duration: String,
    pub country: String,
    pub content_rating: String,
    pub director: String,
    pub income: Option<f64>,
    pub votes: Option<u64>,
    pub score: Option<f64>,
}

impl CleanedRow {
    /// Canonical `YYYY-MM-DD` rendering of the release date
    pub fn release_date_string(&self) -> Option<String> {
        self.release_yr
            .map(|date| date.format(CANONICAL_DATE_FORMAT).to_string())
    }

    /// Text value of a column, `None` for absent typed values
    pub fn text(&self, column: Column) -> Option<String> {
        match column {
            Column::Id => Some(self.id.clone()),
            Column::Title => Some(self.title.clone()),
            Column::ReleaseYear => self.release_date_string(),
            Column::Genre => Some(self.genre.clone()),
            Column::Duration => Some(self.duration.clone()),
            Column::Country => Some(self.country.clone()),
            Column::ContentRating => Some(self.content_rating.clone()),
            Column::Director => Some(self.director.clone()),
            Column::Income => self.income.map(|v| v.to_string()),
            Column::Votes => self.votes.map(|v| v.to_string()),
            Column::Score => self.score.map(|v| v.to_string()),
        }
    }

    /// Render the row back into one delimited line.
    ///
    /// Absent values become [`MISSING_VALUE`], so feeding the line through the
    /// pipeline again yields the same row.
    pub fn to_line(&self, delimiter: char) -> String {
        Column::ALL
            .into_iter()
            .map(|column| {
                self.text(column)
                    .unwrap_or_else(|| MISSING_VALUE.to_string())
            })
            .collect::<Vec<_>>()
            .join(&delimiter.to_string())
    }
}

/// Ordered, schema-conformant output of the assembler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    rows: Vec<CleanedRow>,
}

impl CleanedTable {
    pub fn new(rows: Vec<CleanedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CleanedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanedRow> {
        self.rows.iter()
    }

    /// Find a row by its stable identity
    pub fn get(&self, row_id: RowId) -> Option<&CleanedRow> {
        self.rows.iter().find(|row| row.row_id == row_id)
    }

    /// Render every row as a delimited line
    pub fn to_lines(&self, delimiter: char) -> Vec<String> {
        self.rows.iter().map(|row| row.to_line(delimiter)).collect()
    }
}

impl<'a> IntoIterator for &'a CleanedTable {
    type Item = &'a CleanedRow;
    type IntoIter = std::slice::Iter<'a, CleanedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// =============================================================================
// Run Statistics
// =============================================================================

/// Summary of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub lines_read: usize,
    pub malformed_rows: usize,
    pub dropped_rows: usize,
    pub rows_kept: usize,
    pub failures: BTreeMap<Column, usize>,
    pub overrides_applied: usize,
    pub output_path: Option<PathBuf>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    pub fn total_failures(&self) -> usize {
        self.failures.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_round_trip() {
        for column in Column::ALL {
            assert_eq!(column.name().parse::<Column>().unwrap(), column);
        }
        assert_eq!(Column::Score.index(), 10);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let err = "budget".parse::<Column>().unwrap_err();
        assert!(matches!(err, CleanerError::UnknownColumn { name } if name == "budget"));
    }

    #[test]
    fn test_raw_row_width_is_enforced() {
        let fields: Vec<String> = (0..SCHEMA_WIDTH).map(|i| i.to_string()).collect();
        let row = RawRow::new(RowId(4), fields).unwrap();
        assert_eq!(row.get(Column::ReleaseYear), "2");

        assert_eq!(RawRow::new(RowId(5), vec!["a".to_string()]), Err(1));
    }

    #[test]
    fn test_parse_outcome_or_else_short_circuits() {
        let parsed: ParseOutcome<i32> = ParseOutcome::Parsed(1);
        assert_eq!(parsed.or_else(|_| ParseOutcome::Parsed(2)).value(), Some(&1));

        let failed: ParseOutcome<i32> = ParseOutcome::failed("x");
        let recovered = failed.or_else(|raw| {
            assert_eq!(raw, "x");
            ParseOutcome::Parsed(3)
        });
        assert_eq!(recovered.into_option(), Some(3));
    }

    #[test]
    fn test_absent_values_render_as_missing_marker() {
        let row = CleanedRow {
            row_id: RowId(0),
            id: "tt1".to_string(),
            title: "A".to_string(),
            release_yr: None,
            genre: "Drama".to_string(),
            duration: "120".to_string(),
            country: "USA".to_string(),
            content_rating: "R".to_string(),
            director: "D".to_string(),
            income: Some(1234.5),
            votes: None,
            score: Some(8.0),
        };
        assert_eq!(row.to_line(';'), "tt1;A;NA;Drama;120;USA;R;D;1234.5;NA;8");
    }
}
