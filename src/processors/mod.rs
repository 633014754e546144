pub mod aggregator;
pub mod coordinator;

pub use aggregator::ChunkAccumulator;
pub use coordinator::{scan_chunk, Coordinator};
