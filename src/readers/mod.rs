pub mod chunk_planner;
pub mod mapped_file;
pub mod record_scanner;

pub use chunk_planner::plan_chunks;
pub use mapped_file::MappedFile;
pub use record_scanner::{RawRecord, RecordScanner};
