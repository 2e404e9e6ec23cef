use crate::config::AggregationConfig;
use crate::error::Result;
use crate::models::{AggregateTable, OutputRow, Record};
use crate::processors::accumulation_merger::{merge, MergeOutcome};
use crate::processors::finalizer::finalize;
use crate::processors::partial_aggregator::aggregate_chunk;
use crate::readers::RecordReader;
use crate::utils::progress::ProgressReporter;
use crate::writers::CsvOutputWriter;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub chunks_processed: usize,
    pub records_processed: usize,
    /// Distinct station-days in the output
    pub distinct_keys: usize,
    /// Merges where a station-day already had readings from an earlier chunk
    pub keys_spanning_chunks: usize,
    /// Readings older than an earlier reading from the same station
    pub out_of_order_records: usize,
}

impl ProcessingStats {
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("Aggregation Summary\n");
        summary.push_str("===================\n");
        summary.push_str(&format!("Chunks processed: {}\n", self.chunks_processed));
        summary.push_str(&format!("Records processed: {}\n", self.records_processed));
        summary.push_str(&format!("Station-days: {}\n", self.distinct_keys));
        summary.push_str(&format!(
            "Station-days merged across chunks: {}\n",
            self.keys_spanning_chunks
        ));
        if self.out_of_order_records > 0 {
            summary.push_str(&format!(
                "Out-of-order records: {}\n",
                self.out_of_order_records
            ));
        }
        summary
    }
}

impl fmt::Display for ProcessingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records in {} chunks -> {} station-days",
            self.records_processed, self.chunks_processed, self.distinct_keys
        )
    }
}

/// Running state of one aggregation run: `new`, then `fold_chunk` per chunk
/// in arrival order, then `finalize`.
#[derive(Debug, Default)]
pub struct Accumulator {
    table: AggregateTable,
    stats: ProcessingStats,
    last_seen: HashMap<String, NaiveDateTime>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate `chunk` and merge it into the running table
    pub fn fold_chunk(&mut self, chunk: &[Record]) -> MergeOutcome {
        if chunk.is_empty() {
            return MergeOutcome::default();
        }

        self.track_ordering(chunk);

        let partial = aggregate_chunk(chunk);
        let partial_keys = partial.len();
        let outcome = merge(&mut self.table, partial);

        self.stats.chunks_processed += 1;
        self.stats.records_processed += chunk.len();
        self.stats.keys_spanning_chunks += outcome.combined;
        self.stats.distinct_keys = self.table.len();

        debug!(
            chunk = self.stats.chunks_processed,
            records = chunk.len(),
            partial_keys,
            inserted = outcome.inserted,
            combined = outcome.combined,
            "Folded chunk"
        );

        outcome
    }

    fn track_ordering(&mut self, chunk: &[Record]) {
        for record in chunk {
            match self.last_seen.get_mut(&record.station) {
                Some(last) if record.timestamp < *last => {
                    if self.stats.out_of_order_records == 0 {
                        warn!(
                            station = %record.station,
                            timestamp = %record.timestamp,
                            previous = %last,
                            "Input is not time-ordered; first/last follow timestamps"
                        );
                    }
                    self.stats.out_of_order_records += 1;
                }
                Some(last) => *last = record.timestamp,
                None => {
                    self.last_seen
                        .insert(record.station.clone(), record.timestamp);
                }
            }
        }
    }

    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    pub fn finalize(self) -> (Vec<OutputRow>, ProcessingStats) {
        (finalize(self.table), self.stats)
    }
}

/// Drives chunked aggregation of a record source with the configured chunk size
pub struct ChunkedProcessor {
    config: AggregationConfig,
}

impl ChunkedProcessor {
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Override the chunk size. Zero is rejected like any other invalid setting.
    pub fn with_chunk_size(self, chunk_size: usize) -> Result<Self> {
        Ok(Self::new(self.config.with_chunk_size(chunk_size)?))
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Fold a sequence of chunks. The first failed chunk aborts the run.
    pub fn process_chunks<I>(
        &self,
        chunks: I,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<OutputRow>, ProcessingStats)>
    where
        I: IntoIterator<Item = Result<Vec<Record>>>,
    {
        let mut accumulator = Accumulator::new();

        for chunk in chunks {
            let chunk = chunk?;
            accumulator.fold_chunk(&chunk);

            if let Some(p) = progress {
                let stats = accumulator.stats();
                p.chunk_done(
                    stats.chunks_processed,
                    stats.records_processed,
                    stats.distinct_keys,
                );
            }
        }

        let (rows, stats) = accumulator.finalize();
        info!("Aggregated {}", stats);

        if let Some(p) = progress {
            p.finish_with_message(&format!("Aggregated {}", stats));
        }

        Ok((rows, stats))
    }

    /// Aggregate in-memory records, split into chunks of the configured size
    pub fn process_records(&self, records: &[Record]) -> (Vec<OutputRow>, ProcessingStats) {
        let mut accumulator = Accumulator::new();
        for chunk in records.chunks(self.config.chunk_size) {
            accumulator.fold_chunk(chunk);
        }
        accumulator.finalize()
    }

    /// Aggregate a CSV file on disk
    pub fn process_file(
        &self,
        input: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<(Vec<OutputRow>, ProcessingStats)> {
        info!(
            "Aggregating {} in chunks of {}",
            input.display(),
            self.config.chunk_size
        );
        let reader = RecordReader::from_path(input, &self.config.columns)?;
        self.process_chunks(reader.chunks(self.config.chunk_size), progress)
    }

    /// Read CSV readings from `reader` and write the aggregated CSV to `writer`
    pub fn process_csv<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<ProcessingStats> {
        let records = RecordReader::from_reader(reader, &self.config.columns)?;
        let (rows, stats) = self.process_chunks(records.chunks(self.config.chunk_size), None)?;

        CsvOutputWriter::new().write_rows(&rows, writer)?;

        Ok(stats)
    }
}

impl Default for ChunkedProcessor {
    fn default() -> Self {
        Self::new(AggregationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use chrono::NaiveDate;

    fn hourly(station: &str, temps: &[f32]) -> Vec<Record> {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        temps
            .iter()
            .enumerate()
            .map(|(i, &t)| Record::new(station, start + chrono::Duration::hours(i as i64), t))
            .collect()
    }

    #[test]
    fn test_accumulator_lifecycle() {
        let records = hourly("Foster", &[12.0, 4.0, 7.0, 8.0, 2.0]);
        let mut accumulator = Accumulator::new();

        let first = accumulator.fold_chunk(&records[..3]);
        assert_eq!(first, MergeOutcome { inserted: 1, combined: 0 });

        let empty = accumulator.fold_chunk(&[]);
        assert_eq!(empty, MergeOutcome::default());

        let second = accumulator.fold_chunk(&records[3..]);
        assert_eq!(second, MergeOutcome { inserted: 0, combined: 1 });

        let (rows, stats) = accumulator.finalize();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_temp, 12.0);
        assert_eq!(rows[0].last_temp, 2.0);
        assert_eq!(
            stats,
            ProcessingStats {
                chunks_processed: 2,
                records_processed: 5,
                distinct_keys: 1,
                keys_spanning_chunks: 1,
                out_of_order_records: 0,
            }
        );
    }

    #[test]
    fn test_out_of_order_records_are_counted() {
        let mut records = hourly("Foster", &[1.0, 2.0, 3.0]);
        records.swap(1, 2);

        let (rows, stats) = ChunkedProcessor::default().process_records(&records);

        assert_eq!(stats.out_of_order_records, 1);
        // Timestamps decide first/last, not file position
        assert_eq!(rows[0].first_temp, 1.0);
        assert_eq!(rows[0].last_temp, 3.0);
    }

    #[test]
    fn test_chunk_error_aborts_run() {
        let chunks: Vec<Result<Vec<Record>>> = vec![
            Ok(hourly("Foster", &[1.0])),
            Err(ProcessingError::TemperatureParse {
                line: 3,
                value: "x".to_string(),
            }),
        ];

        let result = ChunkedProcessor::default().process_chunks(chunks, None);
        assert!(matches!(
            result,
            Err(ProcessingError::TemperatureParse { line: 3, .. })
        ));
    }

    #[test]
    fn test_process_csv_end_to_end() -> Result<()> {
        let input = "\
Station Name,Measurement Timestamp,Air Temperature
Foster,2000-01-01 00:00:00,3
Foster,2000-01-01 01:00:00,1
Foster,2000-01-02 00:00:00,2
";
        let mut output = Vec::new();
        let stats = ChunkedProcessor::default()
            .with_chunk_size(2)?
            .process_csv(input.as_bytes(), &mut output)?;

        assert_eq!(stats.chunks_processed, 2);
        assert_eq!(stats.distinct_keys, 2);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "Station Name,Date,Min Temp,Max Temp,First Temp,Last Temp\n\
             Foster,01/01/2000,1.0,3.0,3.0,1.0\n\
             Foster,01/02/2000,2.0,2.0,2.0,2.0\n"
        );
        Ok(())
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = ChunkedProcessor::default().with_chunk_size(0);
        assert!(matches!(result, Err(ProcessingError::Validation(_))));

        let processor = ChunkedProcessor::default().with_chunk_size(3).unwrap();
        assert_eq!(processor.config().chunk_size, 3);
    }

    #[test]
    fn test_stats_summary() {
        let stats = ProcessingStats {
            chunks_processed: 3,
            records_processed: 13,
            distinct_keys: 1,
            keys_spanning_chunks: 2,
            out_of_order_records: 0,
        };

        let summary = stats.summary();
        assert!(summary.contains("Records processed: 13"));
        assert!(summary.contains("merged across chunks: 2"));
        assert!(!summary.contains("Out-of-order"));
        assert_eq!(stats.to_string(), "13 records in 3 chunks -> 1 station-days");
    }
}
