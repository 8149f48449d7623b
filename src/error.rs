//! Error handling for IMDB export cleaning.
//!
//! Per-field parse failures never surface here; they are carried as data in
//! [`crate::models::ParseOutcome`] and the assembler's diagnostics. This enum
//! covers the structural failures that must stop the caller.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Config file could not be parsed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Input file not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Unknown column name: '{name}'")]
    UnknownColumn { name: String },

    #[error("Column '{column}' holds free text and cannot be ordered")]
    NotOrderable { column: String },

    #[error("Cannot aggregate over an empty table")]
    EmptyTable,

    #[error("Every value of column '{column}' is absent")]
    AllValuesAbsent { column: String },

    #[error("Invalid override for row {row}, column '{column}': {reason}")]
    InvalidOverride {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to write output to {path}: {reason}")]
    OutputFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, CleanerError>;
