/// Input column names
pub const TIMESTAMP_COLUMN: &str = "Measurement Timestamp";
pub const STATION_COLUMN: &str = "Station Name";
pub const TEMPERATURE_COLUMN: &str = "Air Temperature";

/// Output column names, in output order
pub const OUTPUT_STATION_COLUMN: &str = "Station Name";
pub const OUTPUT_DATE_COLUMN: &str = "Date";
pub const OUTPUT_MIN_COLUMN: &str = "Min Temp";
pub const OUTPUT_MAX_COLUMN: &str = "Max Temp";
pub const OUTPUT_FIRST_COLUMN: &str = "First Temp";
pub const OUTPUT_LAST_COLUMN: &str = "Last Temp";

/// Calendar day format used in output rows
pub const OUTPUT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Processing defaults
pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "STATION_AGG";
