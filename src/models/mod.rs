pub mod aggregate;
pub mod output;
pub mod record;

pub use aggregate::{AggregateTable, PartialAggregate};
pub use output::OutputRow;
pub use record::{DayKey, Record};
