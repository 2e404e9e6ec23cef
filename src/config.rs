//! Run configuration.
//!
//! Settings come from built-in defaults, an optional config file (any format
//! the `config` crate recognises by extension) and `STATION_AGG_*`
//! environment variables, in increasing order of precedence. Command line
//! flags are applied on top by the CLI.

use crate::error::Result;
use crate::utils::constants::{
    CONFIG_ENV_PREFIX, DEFAULT_CHUNK_SIZE, STATION_COLUMN, TEMPERATURE_COLUMN, TIMESTAMP_COLUMN,
};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Names of the input columns the record reader resolves from the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ColumnConfig {
    #[validate(length(min = 1))]
    pub timestamp: String,

    #[validate(length(min = 1))]
    pub station: String,

    #[validate(length(min = 1))]
    pub temperature: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            timestamp: TIMESTAMP_COLUMN.to_string(),
            station: STATION_COLUMN.to_string(),
            temperature: TEMPERATURE_COLUMN.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AggregationConfig {
    /// Maximum number of records per chunk
    #[validate(range(min = 1))]
    pub chunk_size: usize,

    #[validate(nested)]
    pub columns: ColumnConfig,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            columns: ColumnConfig::default(),
        }
    }
}

impl AggregationConfig {
    /// Load configuration from an optional file plus `STATION_AGG_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env_prefix(path, CONFIG_ENV_PREFIX)
    }

    pub(crate) fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: AggregationConfig = builder.build()?.try_deserialize()?;
        settings.validate()?;

        debug!(
            chunk_size = settings.chunk_size,
            timestamp = %settings.columns.timestamp,
            station = %settings.columns.station,
            temperature = %settings.columns.temperature,
            "Configuration loaded"
        );

        Ok(settings)
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self> {
        self.chunk_size = chunk_size;
        self.validate()?;
        Ok(self)
    }
}
