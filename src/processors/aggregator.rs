use std::collections::HashMap;

use ahash::RandomState;

use crate::error::{AggregateError, Result};
use crate::models::{StationStats, StationSummary};

/// Per-worker station accumulator.
///
/// Keys borrow directly from the mapped buffer, so the hot loop neither
/// allocates nor decodes. Each worker owns exactly one accumulator; the maps
/// are merged sequentially after every worker has joined, and the merged
/// result is independent of worker count and merge order.
#[derive(Debug, Default)]
pub struct ChunkAccumulator<'a> {
    stations: HashMap<&'a [u8], StationStats, RandomState>,
}

impl<'a> ChunkAccumulator<'a> {
    pub fn new() -> Self {
        Self {
            stations: HashMap::default(),
        }
    }

    /// Get-or-insert for `station`, folding `value` into its statistics.
    pub fn record(&mut self, station: &'a [u8], value: f64) {
        self.stations
            .entry(station)
            .and_modify(|stats| stats.observe(value))
            .or_insert_with(|| StationStats::from_sample(value));
    }

    /// Distinct stations seen by this worker.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Decode each key as UTF-8 and fold this worker's statistics into the
    /// shared summary. Decoding happens here, once per distinct key per
    /// worker, rather than per record; invalid key bytes fail the run.
    pub fn merge_into(self, summary: &mut StationSummary) -> Result<()> {
        for (key, stats) in self.stations {
            let station = std::str::from_utf8(key)
                .map_err(|_| AggregateError::InvalidKey {
                    key: String::from_utf8_lossy(key).into_owned(),
                })?
                .to_string();
            summary.merge_station(station, stats);
        }
        Ok(())
    }
}
