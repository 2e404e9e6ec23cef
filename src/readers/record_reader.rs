use crate::config::ColumnConfig;
use crate::error::{ProcessingError, Result};
use crate::models::Record;
use crate::readers::timestamp::parse_timestamp;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Header positions of the three columns a record is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndices {
    timestamp: usize,
    station: usize,
    temperature: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord, columns: &ColumnConfig) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| ProcessingError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            timestamp: find(&columns.timestamp)?,
            station: find(&columns.station)?,
            temperature: find(&columns.temperature)?,
        })
    }
}

/// CSV source of station readings, consumed in bounded chunks
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
    columns: ColumnIndices,
}

impl RecordReader<File> {
    pub fn from_path(path: &Path, columns: &ColumnConfig) -> Result<Self> {
        debug!("Opening input {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file, columns)
    }
}

impl<R: Read> RecordReader<R> {
    /// Wrap a CSV stream, failing early if a required column is absent
    pub fn from_reader(reader: R, columns: &ColumnConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .buffer_capacity(DEFAULT_BUFFER_SIZE)
            .from_reader(reader);

        let headers = reader.headers()?;
        let columns = ColumnIndices::resolve(headers, columns)?;
        debug!(?columns, "Resolved input columns");

        Ok(Self { reader, columns })
    }

    /// Iterate over the input in chunks of at most `chunk_size` records
    pub fn chunks(self, chunk_size: usize) -> RecordChunks<R> {
        RecordChunks {
            reader: self.reader,
            columns: self.columns,
            chunk_size: chunk_size.max(1),
            row: StringRecord::new(),
            done: false,
        }
    }
}

/// Iterator of record chunks. Exhausted after the first error.
pub struct RecordChunks<R: Read> {
    reader: csv::Reader<R>,
    columns: ColumnIndices,
    chunk_size: usize,
    row: StringRecord,
    done: bool,
}

impl<R: Read> RecordChunks<R> {
    fn parse_row(&self) -> Result<Record> {
        let line = self.row.position().map(|p| p.line()).unwrap_or(0);
        let field = |index: usize| self.row.get(index).unwrap_or("").trim();

        let station = field(self.columns.station);
        if station.is_empty() {
            return Err(ProcessingError::EmptyStation { line });
        }

        let raw_timestamp = field(self.columns.timestamp);
        let timestamp =
            parse_timestamp(raw_timestamp).ok_or_else(|| ProcessingError::TimestampParse {
                line,
                value: raw_timestamp.to_string(),
            })?;

        let raw_temperature = field(self.columns.temperature);
        let temperature = raw_temperature
            .parse::<f32>()
            .ok()
            .filter(|t| t.is_finite())
            .ok_or_else(|| ProcessingError::TemperatureParse {
                line,
                value: raw_temperature.to_string(),
            })?;

        Ok(Record::new(station, timestamp, temperature))
    }
}

impl<R: Read> Iterator for RecordChunks<R> {
    type Item = Result<Vec<Record>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = Vec::with_capacity(self.chunk_size);

        while chunk.len() < self.chunk_size {
            match self.reader.read_record(&mut self.row) {
                Ok(true) => match self.parse_row() {
                    Ok(record) => chunk.push(record),
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                },
                Ok(false) => {
                    self.done = true;
                    break;
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}
