use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{AggregateError, Result};
use crate::models::{Chunk, StationSummary};
use crate::processors::ChunkAccumulator;
use crate::readers::{plan_chunks, MappedFile, RecordScanner};
use crate::utils::progress::ProgressReporter;

/// Scan one chunk into a fresh accumulator. This is the whole of a worker's
/// task; any scan error aborts the worker.
pub fn scan_chunk(buf: &[u8], chunk: Chunk) -> Result<ChunkAccumulator<'_>> {
    let mut accumulator = ChunkAccumulator::new();
    for record in RecordScanner::new(buf, chunk) {
        let record = record?;
        accumulator.record(record.station, record.value);
    }
    Ok(accumulator)
}

/// Drives a run: plans chunks, fans one worker out per chunk on a dedicated
/// thread pool, joins them all, and merges their accumulators into the final
/// summary. All-or-nothing: the first worker error aborts the run and no
/// partial result is returned.
pub struct Coordinator {
    max_workers: usize,
}

impl Coordinator {
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    /// Worker count actually used: the configured cap bounded by the host's
    /// logical core count, never less than one.
    pub fn effective_workers(&self) -> usize {
        self.max_workers.min(num_cpus::get()).max(1)
    }

    /// Map `path` into memory and aggregate its records.
    pub fn aggregate_path(
        &self,
        path: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationSummary> {
        let mapped = MappedFile::open(path)?;
        self.aggregate(mapped.as_bytes(), progress)
    }

    /// Aggregate records from an in-memory buffer.
    pub fn aggregate(
        &self,
        buf: &[u8],
        progress: Option<&ProgressReporter>,
    ) -> Result<StationSummary> {
        let started = Instant::now();

        let workers = self.effective_workers();
        let chunks = plan_chunks(buf, workers)?;
        debug!(
            workers,
            chunks = chunks.len(),
            bytes = buf.len(),
            "planned scan"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| AggregateError::Config(e.to_string()))?;

        let completed = AtomicUsize::new(0);
        let accumulators: Result<Vec<ChunkAccumulator<'_>>> = pool.install(|| {
            chunks
                .par_iter()
                .map(|&chunk| {
                    let accumulator = scan_chunk(buf, chunk);

                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(done as u64);
                    }

                    accumulator
                })
                .collect()
        });

        // Join barrier crossed; merge per-worker maps sequentially.
        let mut summary = StationSummary::new();
        for accumulator in accumulators? {
            accumulator.merge_into(&mut summary)?;
        }

        info!(
            stations = summary.len(),
            records = summary.record_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "aggregation complete"
        );

        Ok(summary)
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
