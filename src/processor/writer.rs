//! Output writing for cleaned tables
//!
//! Converts a [`CleanedTable`] into a polars `DataFrame` with typed columns and
//! writes it as CSV or Parquet.

use crate::config::{CleanerConfig, CompressionAlgorithm, OutputFormat};
use crate::constants::{CANONICAL_DATE_FORMAT, MISSING_VALUE, UNIX_EPOCH_DAYS_FROM_CE};
use crate::error::{CleanerError, Result};
use crate::models::{CleanedTable, Column};

use chrono::Datelike;
use polars::prelude::{
    CsvWriter, DataFrame, DataType, NamedFrom, ParquetWriter, SerWriter, Series,
};
use std::fs::File;
use std::path::PathBuf;
use tracing::debug;

/// Writes a cleaned table in the configured format
#[derive(Debug)]
pub struct TableWriter {
    output_path: PathBuf,
    format: OutputFormat,
    compression: CompressionAlgorithm,
    delimiter: char,
}

impl TableWriter {
    pub fn new(output_path: PathBuf, config: &CleanerConfig) -> Self {
        Self {
            output_path,
            format: config.output_format,
            compression: config.compression,
            delimiter: config.delimiter,
        }
    }

    /// Write the table, creating parent directories as needed. Returns the
    /// number of rows written.
    pub fn write(&self, table: &CleanedTable) -> Result<usize> {
        if !self.delimiter.is_ascii() {
            return Err(CleanerError::Configuration {
                message: format!("Delimiter {:?} is not a single-byte character", self.delimiter),
            });
        }
        let separator = self.delimiter as u8;

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut df = to_dataframe(table)?;
        let mut file = File::create(&self.output_path)?;

        match self.format {
            OutputFormat::Csv => CsvWriter::new(&mut file)
                .include_header(true)
                .with_separator(separator)
                .with_date_format(Some(CANONICAL_DATE_FORMAT.to_string()))
                .with_null_value(MISSING_VALUE.to_string())
                .finish(&mut df),
            OutputFormat::Parquet => ParquetWriter::new(file)
                .with_compression(self.compression.to_polars_compression())
                .finish(&mut df)
                .map(|_| ()),
        }
        .map_err(|e| CleanerError::OutputFailed {
            path: self.output_path.clone(),
            reason: e.to_string(),
        })?;

        debug!(
            "Wrote {} rows as {:?} to {}",
            df.height(),
            self.format,
            self.output_path.display()
        );
        Ok(df.height())
    }
}

/// Typed data frame with one column per schema column, in schema order
pub fn to_dataframe(table: &CleanedTable) -> Result<DataFrame> {
    let text = |column: Column| -> Series {
        let values: Vec<String> = table
            .iter()
            .map(|row| row.text(column).unwrap_or_default())
            .collect();
        Series::new(column.name().into(), values)
    };

    let release_days: Vec<Option<i32>> = table
        .iter()
        .map(|row| {
            row.release_yr
                .map(|date| date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
        })
        .collect();
    let release_yr =
        Series::new(Column::ReleaseYear.name().into(), release_days).cast(&DataType::Date)?;

    let income: Vec<Option<f64>> = table.iter().map(|row| row.income).collect();
    let votes: Vec<Option<u64>> = table.iter().map(|row| row.votes).collect();
    let score: Vec<Option<f64>> = table.iter().map(|row| row.score).collect();

    let columns = vec![
        text(Column::Id).into(),
        text(Column::Title).into(),
        release_yr.into(),
        text(Column::Genre).into(),
        text(Column::Duration).into(),
        text(Column::Country).into(),
        text(Column::ContentRating).into(),
        text(Column::Director).into(),
        Series::new(Column::Income.name().into(), income).into(),
        Series::new(Column::Votes.name().into(), votes).into(),
        Series::new(Column::Score.name().into(), score).into(),
    ];

    Ok(DataFrame::new(columns)?)
}
