//! Splitting of raw delimited lines into fixed-width rows.
//!
//! The export has no quoting, so a line is split on every delimiter. Columns
//! that are empty across the whole batch come from a doubled delimiter in the
//! source and are removed before the width check.

use crate::constants::SCHEMA_WIDTH;
use crate::models::{RawRow, RowId};
use tracing::{debug, warn};

/// A data line whose width did not match the schema after column removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    pub row_id: RowId,
    pub field_count: usize,
}

/// Output of splitting a batch of lines
#[derive(Debug, Clone, Default)]
pub struct SplitBatch {
    /// Rows with exactly [`SCHEMA_WIDTH`] fields, in input order
    pub rows: Vec<RawRow>,

    /// Rows excluded because of a wrong field count
    pub malformed: Vec<MalformedRow>,

    /// Column indices (pre-removal) that were empty in every row
    pub removed_columns: Vec<usize>,

    /// Number of data lines seen
    pub lines_read: usize,
}

impl SplitBatch {
    pub fn malformed_count(&self) -> usize {
        self.malformed.len()
    }
}

/// Split one line on `delimiter`, keeping empty fields
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    line.trim_end_matches(['\r', '\n'])
        .split(delimiter)
        .map(str::to_string)
        .collect()
}

/// Split every line, drop all-empty columns and enforce the schema width.
///
/// Row identities are assigned here from the line position and never change
/// afterwards. A row shorter than a column index counts as empty there.
pub fn split_batch<'a, I>(lines: I, delimiter: char) -> SplitBatch
where
    I: IntoIterator<Item = &'a str>,
{
    let split: Vec<Vec<String>> = lines
        .into_iter()
        .map(|line| split_line(line, delimiter))
        .collect();

    let removed_columns = empty_columns(&split);
    if !removed_columns.is_empty() {
        debug!("Removing empty columns at positions {:?}", removed_columns);
    }

    let mut batch = SplitBatch {
        lines_read: split.len(),
        removed_columns,
        ..Default::default()
    };

    for (index, fields) in split.into_iter().enumerate() {
        let row_id = RowId(index);
        let kept: Vec<String> = fields
            .into_iter()
            .enumerate()
            .filter(|(position, _)| !batch.removed_columns.contains(position))
            .map(|(_, field)| field)
            .collect();

        match RawRow::new(row_id, kept) {
            Ok(row) => batch.rows.push(row),
            Err(field_count) => {
                warn!(
                    "Row {} has {} fields, expected {}; excluding it",
                    row_id, field_count, SCHEMA_WIDTH
                );
                batch.malformed.push(MalformedRow {
                    row_id,
                    field_count,
                });
            }
        }
    }

    debug!(
        "Split {} lines into {} rows ({} malformed)",
        batch.lines_read,
        batch.rows.len(),
        batch.malformed.len()
    );

    batch
}

/// Indices where no row holds any content
fn empty_columns(rows: &[Vec<String>]) -> Vec<usize> {
    if rows.is_empty() {
        return Vec::new();
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .filter(|&column| {
            rows.iter()
                .all(|row| row.get(column).is_none_or(|field| field.is_empty()))
        })
        .collect()
}
