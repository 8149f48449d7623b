//! Configuration management and validation.
//!
//! Provides the pipeline configuration, output settings and loading of
//! manual overrides from a TOML file.

use crate::constants::{DEFAULT_DELIMITER, DEFAULT_TOP_N};
use crate::error::{CleanerError, Result};
use crate::overrides::{OverrideEntry, OverrideTable};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Supported compression algorithms for parquet files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    #[default]
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// File format of the cleaned table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_string_lossy().to_lowercase();
        match extension.as_str() {
            "csv" => Some(OutputFormat::Csv),
            "parquet" => Some(OutputFormat::Parquet),
            _ => None,
        }
    }
}

/// Global configuration for a cleaning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Field delimiter of the raw export
    pub delimiter: char,

    /// Skip the first line of the input
    pub has_header: bool,

    /// Start from the built-in, manually verified corrections
    pub use_default_overrides: bool,

    /// Number of titles in the top-grossing summary
    pub top_n: usize,

    /// Output file format
    pub output_format: OutputFormat,

    /// Parquet compression
    pub compression: CompressionAlgorithm,

    /// Additional corrections; these win over the built-in ones
    pub overrides: Vec<OverrideEntry>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            has_header: true,
            use_default_overrides: true,
            top_n: DEFAULT_TOP_N,
            output_format: OutputFormat::default(),
            compression: CompressionAlgorithm::default(),
            overrides: Vec::new(),
        }
    }
}

impl CleanerConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CleanerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            "Loaded config from {} with {} override entries",
            path.display(),
            config.overrides.len()
        );
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_whitespace() || self.delimiter.is_ascii_digit() {
            return Err(CleanerError::Configuration {
                message: format!("Delimiter {:?} would split inside values", self.delimiter),
            });
        }
        if !self.delimiter.is_ascii() {
            return Err(CleanerError::Configuration {
                message: format!("Delimiter {:?} is not a single-byte character", self.delimiter),
            });
        }
        if self.top_n == 0 {
            return Err(CleanerError::Configuration {
                message: "top_n must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Built-in corrections (when enabled) merged with the configured entries
    pub fn override_table(&self) -> Result<OverrideTable> {
        let configured = OverrideTable::from_entries(&self.overrides)?;
        let base = if self.use_default_overrides {
            OverrideTable::with_defaults()
        } else {
            OverrideTable::new()
        };
        Ok(base.merge(configured))
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn without_header(mut self) -> Self {
        self.has_header = false;
        self
    }

    pub fn without_default_overrides(mut self) -> Self {
        self.use_default_overrides = false;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_override(mut self, entry: OverrideEntry) -> Self {
        self.overrides.push(entry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Column, RowId};
    use crate::overrides::OverrideValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CleanerConfig::default();
        assert_eq!(config.delimiter, ';');
        assert!(config.has_header);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.override_table().unwrap().len(), 3);
    }

    #[test]
    fn test_toml_with_overrides() {
        let config = CleanerConfig::from_toml_str(
            r#"
has_header = false
use_default_overrides = false
output_format = "parquet"
compression = "zstd"

[[overrides]]
row = 12
column = "score"
value = "7.5"
"#,
        )
        .unwrap();

        assert!(!config.has_header);
        assert_eq!(config.output_format, OutputFormat::Parquet);
        assert_eq!(config.compression, CompressionAlgorithm::Zstd);

        let table = config.override_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(RowId(12), Column::Score),
            Some(&OverrideValue::Decimal(7.5))
        );
    }

    #[test]
    fn test_unknown_override_column_is_a_parse_error() {
        let result = CleanerConfig::from_toml_str(
            r#"
[[overrides]]
row = 1
column = "budget"
value = "1"
"#,
        );
        assert!(matches!(result, Err(CleanerError::ConfigParse(_))));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(CleanerConfig::default().with_top_n(0).validate().is_err());
        assert!(CleanerConfig::default().with_delimiter(' ').validate().is_err());
        assert!(CleanerConfig::default().with_delimiter('§').validate().is_err());
        assert!(CleanerConfig::default().with_delimiter('|').validate().is_ok());
        assert!(CleanerConfig::from_toml_str("top_n = 0").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "delimiter = \",\"").unwrap();
        writeln!(file, "top_n = 5").unwrap();

        let config = CleanerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/clean.PARQUET")),
            Some(OutputFormat::Parquet)
        );
        assert_eq!(OutputFormat::from_path(Path::new("clean.txt")), None);
    }
}
