use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Required column '{column}' not found in input header")]
    MissingColumn { column: String },

    #[error("Line {line}: invalid timestamp '{value}'")]
    TimestampParse { line: u64, value: String },

    #[error("Line {line}: invalid temperature '{value}'")]
    TemperatureParse { line: u64, value: String },

    #[error("Line {line}: station name is empty")]
    EmptyStation { line: u64 },
}
