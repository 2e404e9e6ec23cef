pub mod accumulation_merger;
pub mod chunked_processor;
pub mod finalizer;
pub mod partial_aggregator;

pub use accumulation_merger::{merge, MergeOutcome};
pub use chunked_processor::{Accumulator, ChunkedProcessor, ProcessingStats};
pub use finalizer::finalize;
pub use partial_aggregator::aggregate_chunk;
