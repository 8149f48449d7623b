//! Command-line interface components.

use crate::config::{CleanerConfig, OutputFormat};
use crate::constants::DEFAULT_OUTPUT_STEM;
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Output format accepted on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Csv,
    Parquet,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Parquet => OutputFormat::Parquet,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "imdb-cleaner")]
#[command(about = "Clean a messy semicolon-delimited IMDB export into a typed table")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Path to the raw export
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Where to write the cleaned table (defaults next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format; guessed from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// TOML file with settings and manual overrides
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not apply the built-in release date corrections
    #[arg(long)]
    pub no_default_overrides: bool,

    /// Number of top-grossing titles to show
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Config file settings with command-line flags applied on top
    pub fn build_config(&self) -> Result<CleanerConfig> {
        let mut config = match &self.config {
            Some(path) => CleanerConfig::from_file(path)?,
            None => CleanerConfig::default(),
        };

        if self.no_default_overrides {
            config = config.without_default_overrides();
        }
        if let Some(top) = self.top {
            config = config.with_top_n(top);
        }
        if let Some(format) = self.resolve_format() {
            config = config.with_output_format(format);
        }

        config.validate()?;
        Ok(config)
    }

    fn resolve_format(&self) -> Option<OutputFormat> {
        self.format
            .map(OutputFormat::from)
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
    }

    /// Get the output path, defaulting to `<input dir>/<input stem>_cleaned.<ext>`
    pub fn get_output_path(&self, format: OutputFormat) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_output_path(&self.input, format),
        }
    }

    /// Get the log level based on verbosity
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{}_{}.{}", stem, DEFAULT_OUTPUT_STEM, format.extension()))
}
