//! Pipeline orchestration.
//!
//! Loads the raw export, runs split and assembly, optionally writes the
//! cleaned table and reports a summary of the run.

pub mod writer;

#[cfg(test)]
pub mod tests;

use self::writer::TableWriter;

use crate::assembler::{Assembly, assemble};
use crate::config::CleanerConfig;
use crate::error::{CleanerError, Result};
use crate::models::{Column, ProcessingStats};
use crate::splitter::split_batch;

use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Clean an in-memory export.
///
/// The first line is skipped when the config says the export has a header.
pub fn clean_text(content: &str, config: &CleanerConfig) -> Result<Assembly> {
    let overrides = config.override_table()?;

    let lines = content
        .lines()
        .skip(usize::from(config.has_header));
    let batch = split_batch(lines, config.delimiter);

    Ok(assemble(&batch, &overrides))
}

/// Runs the cleaning pipeline over one input file
#[derive(Debug)]
pub struct CleaningPipeline {
    input_path: PathBuf,
    output_path: Option<PathBuf>,
    config: CleanerConfig,
}

impl CleaningPipeline {
    /// Create a pipeline for `input_path`; the table is only written when an
    /// output path is given
    pub fn new(input_path: PathBuf, output_path: Option<PathBuf>) -> Result<Self> {
        if !input_path.is_file() {
            return Err(CleanerError::InputNotFound { path: input_path });
        }

        Ok(Self {
            input_path,
            output_path,
            config: CleanerConfig::default(),
        })
    }

    /// Configure the pipeline
    pub fn with_config(mut self, config: CleanerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Load and clean the input without writing anything
    pub fn clean(&self) -> Result<Assembly> {
        self.config.validate()?;

        let content = std::fs::read_to_string(&self.input_path)?;
        debug!(
            "Read {} bytes from {}",
            content.len(),
            self.input_path.display()
        );

        clean_text(&content, &self.config)
    }

    /// Main processing entry point
    pub fn process(&self) -> Result<(Assembly, ProcessingStats)> {
        let start_time = Instant::now();
        println!("{}", "Starting IMDB export cleaning".bright_green().bold());
        println!(
            "  {} {}",
            "Input:".bright_cyan(),
            self.input_path.display()
        );

        let assembly = self.clean()?;

        if let Some(output_path) = &self.output_path {
            println!(
                "  {} {}",
                "Output:".bright_cyan(),
                output_path.display()
            );
            let writer = TableWriter::new(output_path.clone(), &self.config);
            writer.write(&assembly.table)?;
        }

        let stats = ProcessingStats {
            processing_time_ms: start_time.elapsed().as_millis(),
            output_path: self.output_path.clone(),
            ..collect_stats(&assembly)
        };
        info!(
            "Cleaned {} of {} rows in {}ms",
            stats.rows_kept, stats.lines_read, stats.processing_time_ms
        );
        print_summary(&stats);

        Ok((assembly, stats))
    }
}

/// Counts derived from an assembled table and its diagnostics
pub fn collect_stats(assembly: &Assembly) -> ProcessingStats {
    let diagnostics = &assembly.diagnostics;
    let rows_kept = assembly.table.len();
    let malformed_rows = diagnostics.malformed.len();
    let dropped_rows = diagnostics.dropped_empty_date.len();

    let failures = [
        Column::ReleaseYear,
        Column::Income,
        Column::Votes,
        Column::Score,
    ]
    .into_iter()
    .map(|column| (column, diagnostics.failure_count(column)))
    .collect();

    ProcessingStats {
        lines_read: rows_kept + malformed_rows + dropped_rows,
        malformed_rows,
        dropped_rows,
        rows_kept,
        failures,
        overrides_applied: diagnostics.overrides_applied,
        ..Default::default()
    }
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Cleaning Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Lines read:".bright_cyan(),
        stats.lines_read.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Rows kept:".bright_cyan(),
        stats.rows_kept.to_string().bright_white().bold()
    );
    if stats.malformed_rows > 0 {
        println!(
            "  {} {}",
            "Malformed rows:".bright_red(),
            stats.malformed_rows.to_string().bright_red().bold()
        );
    }
    if stats.dropped_rows > 0 {
        println!(
            "  {} {}",
            "Blank release dates:".bright_yellow(),
            stats.dropped_rows.to_string().bright_yellow()
        );
    }
    println!(
        "  {} {}",
        "Overrides applied:".bright_cyan(),
        stats.overrides_applied.to_string().bright_white()
    );
    for (column, count) in stats.failures.iter().filter(|(_, count)| **count > 0) {
        println!(
            "  {} {}",
            format!("Unparsed {}:", column).bright_yellow(),
            count.to_string().bright_yellow()
        );
    }
}
