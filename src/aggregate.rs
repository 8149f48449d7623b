//! Queries over the cleaned table.
//!
//! Ties keep source order: `max_by` returns the first row holding the
//! maximum and `top_n` sorts stably.

use crate::error::{CleanerError, Result};
use crate::models::{CleanedRow, CleanedTable, Column};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Direction of a `top_n` query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SortKey {
    Date(NaiveDate),
    Integer(u64),
    Decimal(f64),
}

impl SortKey {
    fn of(row: &CleanedRow, column: Column) -> Option<Self> {
        match column {
            Column::ReleaseYear => row.release_yr.map(SortKey::Date),
            Column::Income => row.income.map(SortKey::Decimal),
            Column::Votes => row.votes.map(SortKey::Integer),
            Column::Score => row.score.map(SortKey::Decimal),
            _ => None,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Decimal(a), SortKey::Decimal(b)) => a.total_cmp(b),
            // A column always yields one variant
            _ => Ordering::Equal,
        }
    }
}

/// Row with the largest value in `column`, first-seen on ties
pub fn max_by(table: &CleanedTable, column: Column) -> Result<&CleanedRow> {
    let keyed = keyed_rows(table, column)?;

    let mut best = keyed[0];
    for candidate in keyed.into_iter().skip(1) {
        if candidate.1.compare(&best.1) == Ordering::Greater {
            best = candidate;
        }
    }
    Ok(best.0)
}

/// First `n` rows ordered by `column`, equal keys in source order.
///
/// Rows with an absent value are left out.
pub fn top_n(
    table: &CleanedTable,
    column: Column,
    n: usize,
    order: SortOrder,
) -> Result<Vec<&CleanedRow>> {
    let mut keyed = keyed_rows(table, column)?;

    keyed.sort_by(|a, b| match order {
        SortOrder::Ascending => a.1.compare(&b.1),
        SortOrder::Descending => b.1.compare(&a.1),
    });

    Ok(keyed.into_iter().take(n).map(|(row, _)| row).collect())
}

/// Rows with a present key, rejecting text columns, empty tables and
/// columns without any value
fn keyed_rows(table: &CleanedTable, column: Column) -> Result<Vec<(&CleanedRow, SortKey)>> {
    if !column.is_orderable() {
        return Err(CleanerError::NotOrderable {
            column: column.name().to_string(),
        });
    }
    if table.is_empty() {
        return Err(CleanerError::EmptyTable);
    }

    let keyed: Vec<_> = table
        .iter()
        .filter_map(|row| SortKey::of(row, column).map(|key| (row, key)))
        .collect();

    if keyed.is_empty() {
        return Err(CleanerError::AllValuesAbsent {
            column: column.name().to_string(),
        });
    }
    Ok(keyed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowId;

    fn row(index: usize, title: &str, income: Option<f64>) -> CleanedRow {
        CleanedRow {
            row_id: RowId(index),
            id: format!("tt{index}"),
            title: title.to_string(),
            release_yr: NaiveDate::from_ymd_opt(2000 + index as i32, 1, 1),
            genre: "Drama".to_string(),
            duration: "100".to_string(),
            country: "USA".to_string(),
            content_rating: "PG".to_string(),
            director: "Someone".to_string(),
            income,
            votes: None,
            score: Some(7.0),
        }
    }

    fn table() -> CleanedTable {
        CleanedTable::new(vec![
            row(0, "A", Some(100.0)),
            row(1, "B", Some(300.0)),
            row(2, "C", Some(300.0)),
        ])
    }

    fn titles(rows: &[&CleanedRow]) -> Vec<String> {
        rows.iter().map(|r| r.title.clone()).collect()
    }

    #[test]
    fn test_max_by_prefers_first_seen_on_tie() {
        let table = table();
        assert_eq!(max_by(&table, Column::Income).unwrap().title, "B");
    }

    #[test]
    fn test_top_n_descending_keeps_tie_order() {
        let table = table();
        let top = top_n(&table, Column::Income, 2, SortOrder::Descending).unwrap();
        assert_eq!(titles(&top), ["B", "C"]);
    }

    #[test]
    fn test_top_n_ascending_and_oversized_n() {
        let table = table();
        let all = top_n(&table, Column::Income, 10, SortOrder::Ascending).unwrap();
        assert_eq!(titles(&all), ["A", "B", "C"]);
    }

    #[test]
    fn test_absent_values_are_skipped() {
        let table = CleanedTable::new(vec![row(0, "A", None), row(1, "B", Some(5.0))]);
        assert_eq!(max_by(&table, Column::Income).unwrap().title, "B");
        assert_eq!(
            titles(&top_n(&table, Column::Income, 5, SortOrder::Descending).unwrap()),
            ["B"]
        );
    }

    #[test]
    fn test_dates_order_chronologically() {
        let table = table();
        assert_eq!(max_by(&table, Column::ReleaseYear).unwrap().title, "C");
    }

    #[test]
    fn test_structural_failures() {
        let empty = CleanedTable::default();
        assert!(matches!(
            max_by(&empty, Column::Income),
            Err(CleanerError::EmptyTable)
        ));

        let table = table();
        assert!(matches!(
            top_n(&table, Column::Votes, 3, SortOrder::Descending),
            Err(CleanerError::AllValuesAbsent { column }) if column == "votes"
        ));
        assert!(matches!(
            max_by(&table, Column::Title),
            Err(CleanerError::NotOrderable { .. })
        ));
    }
}
