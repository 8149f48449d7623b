//! IMDB Export Cleaner Library
//!
//! Turns a semicolon-delimited, inconsistently formatted movie export into a
//! clean, typed table suitable for aggregate queries.
//!
//! This library provides tools for:
//! - Splitting raw lines and removing doubled-delimiter artifact columns
//! - Recovering release dates from mixed date layouts
//! - Extracting numbers from currency, thousands-separated and decimal-comma text
//! - Applying manually verified corrections keyed by stable row identity
//! - Assembling the cleaned table with per-field diagnostics
//! - Max and top-N queries with stable tie-breaking
//! - Writing the cleaned table to CSV or Parquet

pub mod aggregate;
pub mod assembler;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalize;
pub mod overrides;
pub mod processor;
pub mod splitter;

// Re-export commonly used types
pub use aggregate::{SortOrder, max_by, top_n};
pub use assembler::{Assembly, Diagnostics, FieldFailure, assemble};
pub use config::{CleanerConfig, CompressionAlgorithm, OutputFormat};
pub use error::{CleanerError, Result};
pub use models::{CleanedRow, CleanedTable, Column, ParseOutcome, ProcessingStats, RawRow, RowId};
pub use overrides::{OverrideEntry, OverrideTable, OverrideValue};
pub use processor::{CleaningPipeline, clean_text};
pub use splitter::{MalformedRow, SplitBatch, split_batch, split_line};
