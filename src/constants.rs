//! Application constants for the IMDB cleaner
//!
//! This module contains the fixed schema, date formats, extraction patterns
//! and the manually verified corrections used throughout the pipeline.

// =============================================================================
// Input Layout
// =============================================================================

/// Field delimiter of the raw export
pub const DEFAULT_DELIMITER: char = ';';

/// Number of columns every row must have once empty columns are removed
pub const SCHEMA_WIDTH: usize = 11;

/// Column names assigned positionally after splitting
pub const COLUMN_NAMES: [&str; SCHEMA_WIDTH] = [
    "ID",
    "title",
    "release_yr",
    "genre",
    "duration",
    "country",
    "content_rating",
    "director",
    "income",
    "votes",
    "score",
];

/// Marker written for absent values when a cleaned row is rendered back to text.
/// It never parses as a date or a number, so re-cleaning keeps the value absent.
pub const MISSING_VALUE: &str = "NA";

// =============================================================================
// Date Formats
// =============================================================================

/// Canonical output format for release dates
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Year-first layouts, tried before the day-first ones so ISO input is a fixed point
pub const YEAR_FIRST_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y %m %d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Numeric day-first layouts
pub const DAY_FIRST_FORMATS: &[&str] = &["%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%d %m %Y"];

/// Numeric day-first layouts with a two-digit year (`00`-`69` is 20xx, `70`-`99` is 19xx)
pub const DAY_FIRST_SHORT_YEAR_FORMATS: &[&str] = &["%d-%m-%y", "%d/%m/%y", "%d.%m.%y", "%d %m %y"];

/// `%Y` accepts any digit count, so `%Y` layouts only run when the value
/// starts (year-first) or ends (everything else) with a four-digit year
pub const LEADING_YEAR_PATTERN: &str = r"^[0-9]{4}(?:[^0-9]|$)";
pub const TRAILING_YEAR_PATTERN: &str = r"(?:^|[^0-9])[0-9]{4}$";

/// Layouts that spell the month out. `%B` also accepts abbreviated names.
pub const MONTH_NAME_FORMATS: &[&str] = &[
    "%d %B %Y",
    "%d-%B-%Y",
    "%d/%B/%Y",
    "%d %B, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%B-%d-%Y",
];

/// Month-first numeric layout that the day-first parser rejects
pub const MONTH_FIRST_STRICT_FORMAT: &str = "%m %d %Y";

// =============================================================================
// Numeric Extraction
// =============================================================================

/// First number in a score after decimal commas became points
pub const SCORE_PATTERN: &str = r"[0-9]+\.?[0-9]*";

// =============================================================================
// Manual Corrections
// =============================================================================

/// Release dates cross-checked by hand against an external source.
///
/// Keys are the zero-based data-line index of the original export:
/// - 70: "The 6th of marzo, year 1951"
/// - 83: invalid day in the source
/// - 84: month and day swapped in the source
pub const DEFAULT_DATE_OVERRIDES: &[(usize, &str)] = &[
    (70, "1951-03-06"),
    (83, "1984-02-24"),
    (84, "1976-12-24"),
];

// =============================================================================
// Reporting
// =============================================================================

/// Number of titles shown in the top-grossing summary
pub const DEFAULT_TOP_N: usize = 3;

// =============================================================================
// Output
// =============================================================================

/// Days from 0001-01-01 to 1970-01-01, for polars' epoch-based Date type
pub const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Default file name stem when no output path is given
pub const DEFAULT_OUTPUT_STEM: &str = "cleaned";
