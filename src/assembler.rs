//! Table assembly from split rows.
//!
//! Runs the pipeline stages in order, each consuming the previous stage's
//! rows:
//! 1. positional rename and per-field normalization
//! 2. override application keyed by [`RowId`]
//! 3. removal of rows whose raw release date is blank
//! 4. failure recomputation on what is left
//!
//! Per-field failures end up in [`Diagnostics`], never as errors.

use crate::models::{CleanedRow, CleanedTable, Column, ParseOutcome, RawRow, RowId};
use crate::normalize::{extract_currency, extract_integer, extract_score, normalize_date};
use crate::overrides::{OverrideTable, OverrideValue};
use crate::splitter::{MalformedRow, SplitBatch};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// A typed cell that is still unparsed after overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub row_id: RowId,
    pub column: Column,
    pub raw: String,
}

/// Everything the assembler did not turn into clean data
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Rows excluded by the splitter
    pub malformed: Vec<MalformedRow>,

    /// Cells of kept rows that are absent because parsing failed
    pub failures: Vec<FieldFailure>,

    /// Rows removed because their raw release date was blank
    pub dropped_empty_date: Vec<RowId>,

    /// Number of cells of kept rows replaced by an override
    pub overrides_applied: usize,

    /// Override rows that matched no well-formed row
    pub unmatched_overrides: Vec<RowId>,
}

impl Diagnostics {
    /// Rows whose `column` is still broken
    pub fn failed_rows(&self, column: Column) -> BTreeSet<RowId> {
        self.failures
            .iter()
            .filter(|failure| failure.column == column)
            .map(|failure| failure.row_id)
            .collect()
    }

    pub fn failure_count(&self, column: Column) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.column == column)
            .count()
    }
}

/// Cleaned table plus the diagnostics of its construction
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub table: CleanedTable,
    pub diagnostics: Diagnostics,
}

/// A renamed row whose typed cells still carry their parse outcomes
#[derive(Debug, Clone)]
struct NormalizedRow {
    row_id: RowId,
    raw_date: String,
    id: String,
    title: String,
    release_yr: ParseOutcome<NaiveDate>,
    genre: String,
    duration: String,
    country: String,
    content_rating: String,
    director: String,
    income: ParseOutcome<f64>,
    votes: ParseOutcome<u64>,
    score: ParseOutcome<f64>,
}

impl NormalizedRow {
    fn from_raw(raw: RawRow) -> Self {
        let row_id = raw.id;
        let [
            id,
            title,
            release_yr,
            genre,
            duration,
            country,
            content_rating,
            director,
            income,
            votes,
            score,
        ] = raw.into_fields();

        Self {
            row_id,
            release_yr: normalize_date(&release_yr),
            income: extract_currency(&income),
            votes: extract_integer(&votes),
            score: extract_score(&score),
            raw_date: release_yr,
            id,
            title,
            genre,
            duration,
            country,
            content_rating,
            director,
        }
    }

    fn apply(&mut self, column: Column, value: &OverrideValue) {
        match (column, value) {
            (Column::ReleaseYear, OverrideValue::Date(date)) => {
                self.release_yr = ParseOutcome::Parsed(*date)
            }
            (Column::Income, OverrideValue::Decimal(v)) => self.income = ParseOutcome::Parsed(*v),
            (Column::Votes, OverrideValue::Integer(v)) => self.votes = ParseOutcome::Parsed(*v),
            (Column::Score, OverrideValue::Decimal(v)) => self.score = ParseOutcome::Parsed(*v),
            (column, OverrideValue::Text(text)) => {
                if let Some(field) = self.text_field_mut(column) {
                    *field = text.clone();
                }
            }
            (column, value) => {
                warn!(
                    "Override {:?} does not fit column {} of row {}",
                    value, column, self.row_id
                );
            }
        }
    }

    fn text_field_mut(&mut self, column: Column) -> Option<&mut String> {
        match column {
            Column::Id => Some(&mut self.id),
            Column::Title => Some(&mut self.title),
            Column::Genre => Some(&mut self.genre),
            Column::Duration => Some(&mut self.duration),
            Column::Country => Some(&mut self.country),
            Column::ContentRating => Some(&mut self.content_rating),
            Column::Director => Some(&mut self.director),
            Column::ReleaseYear | Column::Income | Column::Votes | Column::Score => None,
        }
    }

    fn failures(&self) -> Vec<FieldFailure> {
        let cells = [
            (Column::ReleaseYear, self.release_yr.raw()),
            (Column::Income, self.income.raw()),
            (Column::Votes, self.votes.raw()),
            (Column::Score, self.score.raw()),
        ];
        cells
            .into_iter()
            .filter_map(|(column, raw)| {
                raw.map(|raw| FieldFailure {
                    row_id: self.row_id,
                    column,
                    raw: raw.to_string(),
                })
            })
            .collect()
    }

    fn into_cleaned(self) -> CleanedRow {
        CleanedRow {
            row_id: self.row_id,
            id: self.id,
            title: self.title,
            release_yr: self.release_yr.into_option(),
            genre: self.genre,
            duration: self.duration,
            country: self.country,
            content_rating: self.content_rating,
            director: self.director,
            income: self.income.into_option(),
            votes: self.votes.into_option(),
            score: self.score.into_option(),
        }
    }
}

/// Build the cleaned table from a split batch
pub fn assemble(batch: &SplitBatch, overrides: &OverrideTable) -> Assembly {
    let normalized = normalize_rows(&batch.rows);
    let overridden = apply_overrides(normalized, overrides);
    let (kept, dropped_empty_date) = drop_blank_dates(overridden);

    let overrides_applied: usize = kept
        .iter()
        .map(|row| overrides.for_row(row.row_id).count())
        .sum();

    let failures: Vec<FieldFailure> = kept.iter().flat_map(NormalizedRow::failures).collect();
    let table = CleanedTable::new(kept.into_iter().map(NormalizedRow::into_cleaned).collect());

    let present: BTreeSet<RowId> = batch.rows.iter().map(|row| row.id).collect();
    let unmatched_overrides: Vec<RowId> = overrides
        .rows()
        .into_iter()
        .filter(|row| !present.contains(row))
        .collect();
    for row in &unmatched_overrides {
        warn!("Override targets row {} which is not a well-formed row", row);
    }

    info!(
        "Assembled {} rows ({} malformed, {} blank dates, {} cells overridden, {} cells unparsed)",
        table.len(),
        batch.malformed.len(),
        dropped_empty_date.len(),
        overrides_applied,
        failures.len()
    );

    Assembly {
        table,
        diagnostics: Diagnostics {
            malformed: batch.malformed.clone(),
            failures,
            dropped_empty_date,
            overrides_applied,
            unmatched_overrides,
        },
    }
}

fn normalize_rows(rows: &[RawRow]) -> Vec<NormalizedRow> {
    rows.iter()
        .cloned()
        .map(NormalizedRow::from_raw)
        .collect()
}

fn apply_overrides(rows: Vec<NormalizedRow>, overrides: &OverrideTable) -> Vec<NormalizedRow> {
    rows.into_iter()
        .map(|mut row| {
            for (column, value) in overrides.for_row(row.row_id) {
                debug!("Applying override to row {} column {}", row.row_id, column);
                row.apply(column, value);
            }
            row
        })
        .collect()
}

fn drop_blank_dates(rows: Vec<NormalizedRow>) -> (Vec<NormalizedRow>, Vec<RowId>) {
    let (kept, dropped): (Vec<_>, Vec<_>) = rows
        .into_iter()
        .partition(|row| !row.raw_date.trim().is_empty());

    let dropped_ids: Vec<RowId> = dropped.iter().map(|row| row.row_id).collect();
    if !dropped_ids.is_empty() {
        debug!("Dropping rows with blank release date: {:?}", dropped_ids);
    }
    (kept, dropped_ids)
}
