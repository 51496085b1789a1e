/// Strict calendar format accepted in the date field of raw records
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Metric key suffixes. Temperature carries no suffix: the bare
/// `{location}_{year}-{month:02}` key is the temperature key by wire
/// contract, and downstream consumers depend on it staying that way.
pub const HUMIDITY_SUFFIX: &str = "_humidity";
pub const PRESSURE_SUFFIX: &str = "_pressure";

/// Lines starting with this are comments
pub const COMMENT_PREFIX: char = '#';

/// Header-row convention: a data line never starts with this (case-insensitive)
pub const HEADER_PREFIX: &str = "date";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
