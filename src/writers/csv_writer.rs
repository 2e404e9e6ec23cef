use crate::error::Result;
use crate::models::OutputRow;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes aggregated rows as CSV with the fixed output header
pub struct CsvOutputWriter {
    buffer_capacity: usize,
}

impl CsvOutputWriter {
    pub fn new() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_SIZE,
        }
    }

    /// Serialize rows to any writer. The header is written even when there are no rows.
    pub fn write_rows<W: Write>(&self, rows: &[OutputRow], writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .buffer_capacity(self.buffer_capacity)
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(OutputRow::HEADER)?;
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    /// Write rows to `path`, creating parent directories as needed
    pub fn write_to_path(&self, rows: &[OutputRow], path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        self.write_rows(rows, file)?;

        info!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(())
    }
}

impl Default for CsvOutputWriter {
    fn default() -> Self {
        Self::new()
    }
}
