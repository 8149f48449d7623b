//! Error handling integration tests

use super::{MESSY_EXPORT, write_input};
use crate::config::CleanerConfig;
use crate::error::CleanerError;
use crate::processor::{CleaningPipeline, clean_text};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_nonexistent_input_path() {
    let temp_dir = TempDir::new().unwrap();
    let nonexistent_path = temp_dir.path().join("nonexistent.csv");

    let result = CleaningPipeline::new(nonexistent_path.clone(), None);

    match result.unwrap_err() {
        CleanerError::InputNotFound { path } => {
            assert_eq!(path, nonexistent_path);
        }
        other => panic!("Expected InputNotFound error, got {other:?}"),
    }
}

#[test]
fn test_directory_is_not_an_input() {
    let temp_dir = TempDir::new().unwrap();
    let result = CleaningPipeline::new(temp_dir.path().to_path_buf(), None);
    assert!(matches!(result, Err(CleanerError::InputNotFound { .. })));
}

#[test]
fn test_invalid_override_stops_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_input(&temp_dir, MESSY_EXPORT);
    let output_path = temp_dir.path().join("clean.csv");

    let config = CleanerConfig::from_toml_str(
        r#"
[[overrides]]
row = 1
column = "release_yr"
value = "24/12/1976"
"#,
    )
    .unwrap();

    let pipeline = CleaningPipeline::new(input_path, Some(output_path.clone()))
        .unwrap()
        .with_config(config);

    assert!(matches!(
        pipeline.process(),
        Err(CleanerError::InvalidOverride { row: 1, .. })
    ));
    assert!(!output_path.exists());
}

#[test]
fn test_invalid_config_is_rejected_before_reading() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_input(&temp_dir, MESSY_EXPORT);

    let pipeline = CleaningPipeline::new(input_path, None)
        .unwrap()
        .with_config(CleanerConfig::default().with_top_n(0));

    assert!(matches!(
        pipeline.clean(),
        Err(CleanerError::Configuration { .. })
    ));
}

#[test]
fn test_only_malformed_rows() {
    let export = "header\nfoo;bar\nbaz\n";
    let assembly = clean_text(export, &CleanerConfig::default()).unwrap();

    assert!(assembly.table.is_empty());
    assert_eq!(assembly.diagnostics.malformed.len(), 2);
}

#[test]
fn test_empty_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_input(&temp_dir, "");

    let (assembly, stats) = CleaningPipeline::new(input_path, None)
        .unwrap()
        .process()
        .unwrap();

    assert!(assembly.table.is_empty());
    assert_eq!(stats.lines_read, 0);
}

#[test]
fn test_unwritable_output() {
    let temp_dir = TempDir::new().unwrap();
    let input_path = write_input(&temp_dir, MESSY_EXPORT);

    // A regular file where the output directory should be
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    let output_path = blocker.join("clean.csv");

    let result = CleaningPipeline::new(input_path, Some(output_path)).unwrap().process();
    assert!(matches!(result, Err(CleanerError::Io(_))));
}
