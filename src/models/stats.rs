use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

/// Running summary statistics for a single station.
///
/// The stored representation is the merge-closed `{min, max, sum, count}` tuple;
/// the mean is derived on demand so that accumulation stays associative and
/// commutative regardless of worker count or merge order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationStats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl StationStats {
    /// Stats for the first observation of a station.
    pub fn from_sample(sample: f64) -> Self {
        Self {
            min: sample,
            max: sample,
            sum: sample,
            count: 1,
        }
    }

    /// Fold one more sample into the running statistics.
    pub fn observe(&mut self, sample: f64) {
        if sample < self.min {
            self.min = sample;
        }
        if sample > self.max {
            self.max = sample;
        }
        self.sum += sample;
        self.count += 1;
    }

    /// Fold another station's accumulated statistics into this one.
    pub fn merge(&mut self, other: &StationStats) {
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// The final station → statistics map handed back to the caller.
///
/// Built by merging per-worker accumulators after all workers have joined;
/// read-only from the caller's point of view.
#[derive(Debug, Default)]
pub struct StationSummary {
    stations: HashMap<String, StationStats, RandomState>,
}

impl StationSummary {
    pub fn new() -> Self {
        Self {
            stations: HashMap::default(),
        }
    }

    /// Number of distinct stations observed.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, station: &str) -> Option<&StationStats> {
        self.stations.get(station)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StationStats)> + '_ {
        self.stations.iter().map(|(name, stats)| (name.as_str(), stats))
    }

    /// Total number of records folded into the summary.
    pub fn record_count(&self) -> u64 {
        self.stations.values().map(|stats| stats.count).sum()
    }

    /// Merge one station's accumulated statistics into the summary.
    pub fn merge_station(&mut self, station: String, stats: StationStats) {
        self.stations
            .entry(station)
            .and_modify(|existing| existing.merge(&stats))
            .or_insert(stats);
    }

    /// Entries sorted by station name, for deterministic presentation.
    pub fn to_sorted_vec(&self) -> Vec<(&str, &StationStats)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }
}
