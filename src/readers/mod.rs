pub mod record_reader;
pub mod timestamp;

pub use record_reader::{RecordChunks, RecordReader};
pub use timestamp::parse_timestamp;
