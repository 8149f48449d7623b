//! Integration tests for the processor module
//!
//! Runs the complete pipeline over small exports written to temp files.

pub mod error_handling;

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A messy export: header, doubled delimiter before income, mixed date
/// layouts, one malformed row and one blank date
pub const MESSY_EXPORT: &str = "\
IMBD title ID;Original titlE;Release year;Genre;Duration;Country;Content Rating;Director;Unnamed: 8;Income;Votes;Score
tt0111161;The Shawshank Redemption;1995-02-10;Drama;142;USA;R;Frank Darabont;;$ 28815245;2.278.845;9,3
tt0068646;The Godfather;24--12-1976;Crime;175;USA;R;Francis Ford Coppola;;$ 246120974;1.572.674;9.2
tt0468569;The Dark Knight;09 21 1972;Action;152;USA;PG-13;Christopher Nolan;;$ 1005455211;2.241.615;9.0f
tt0071562;Broken Row;1974;Crime
tt0050083;12 Angry Men;   ;Drama;96;USA;Approved;Sidney Lumet;;$ 2945;668.473;9.0
tt0108052;Schindler's List;1994-03-04;Biography;195;USA;R;Steven Spielberg;;o$ 322161245;1.183.248;8,9
";

/// Write `content` to `input.csv` inside a fresh temp dir
pub fn write_input(temp_dir: &TempDir, content: &str) -> PathBuf {
    let input_path = temp_dir.path().join("input.csv");
    fs::write(&input_path, content).unwrap();
    input_path
}
