//! Manually authored corrections keyed by stable row identity.
//!
//! Literals are validated against the column type when the table is built, so
//! applying an override can never fail. Overrides always replace the automated
//! outcome for their cell.

use crate::constants::{CANONICAL_DATE_FORMAT, DEFAULT_DATE_OVERRIDES};
use crate::error::{CleanerError, Result};
use crate::models::{Column, RowId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// A typed replacement value
#[derive(Debug, Clone, PartialEq)]
pub enum OverrideValue {
    Text(String),
    Date(NaiveDate),
    Integer(u64),
    Decimal(f64),
}

/// One `(row, column, value)` triple as written in a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub row: usize,
    pub column: Column,
    pub value: String,
}

/// Validated corrections, at most one per cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideTable {
    entries: BTreeMap<(RowId, Column), OverrideValue>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The release date corrections verified for the source export
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for &(row, date) in DEFAULT_DATE_OVERRIDES {
            if let Err(e) = table.insert(RowId(row), Column::ReleaseYear, date) {
                warn!("Skipping built-in override: {}", e);
            }
        }
        table
    }

    /// Build a table from config entries. Later entries for the same cell win.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a OverrideEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.insert(RowId(entry.row), entry.column, &entry.value)?;
        }
        Ok(table)
    }

    /// Validate `literal` for `column` and store it, replacing any previous value
    pub fn insert(&mut self, row: RowId, column: Column, literal: &str) -> Result<()> {
        let value = parse_literal(row, column, literal)?;
        if let Some(previous) = self.entries.insert((row, column), value) {
            debug!(
                "Override for row {} column {} replaces {:?}",
                row, column, previous
            );
        }
        Ok(())
    }

    /// Add every entry of `other`, letting it win on shared cells
    pub fn merge(mut self, other: OverrideTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn get(&self, row: RowId, column: Column) -> Option<&OverrideValue> {
        self.entries.get(&(row, column))
    }

    /// Overrides targeting one row, in column order
    pub fn for_row(&self, row: RowId) -> impl Iterator<Item = (Column, &OverrideValue)> + '_ {
        self.entries
            .range((row, Column::Id)..=(row, Column::Score))
            .map(|(&(_, column), value)| (column, value))
    }

    /// Distinct rows that have at least one override
    pub fn rows(&self) -> Vec<RowId> {
        let mut rows: Vec<RowId> = self.entries.keys().map(|&(row, _)| row).collect();
        rows.dedup();
        rows
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_literal(row: RowId, column: Column, literal: &str) -> Result<OverrideValue> {
    let invalid = |reason: String| CleanerError::InvalidOverride {
        row: row.0,
        column: column.name().to_string(),
        reason,
    };

    let literal = literal.trim();
    match column {
        Column::ReleaseYear => NaiveDate::parse_from_str(literal, CANONICAL_DATE_FORMAT)
            .map(OverrideValue::Date)
            .map_err(|e| invalid(format!("'{}' is not a YYYY-MM-DD date ({})", literal, e))),
        Column::Votes => literal
            .parse::<u64>()
            .map(OverrideValue::Integer)
            .map_err(|e| invalid(format!("'{}' is not a vote count ({})", literal, e))),
        Column::Income | Column::Score => match literal.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(OverrideValue::Decimal(value)),
            _ => Err(invalid(format!(
                "'{}' is not a non-negative number",
                literal
            ))),
        },
        _ => Ok(OverrideValue::Text(literal.to_string())),
    }
}
