// # Histogram Observer
//
// Score statistics over the most recent accepted batch, plus a cumulative
// count of rejected entries.

use std::sync::{Arc, Mutex};

use crate::entry::Entry;
use crate::traits::{BatchObserver, DataObserver, LogSink};

/// Statistics of one accepted batch
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreStats {
    /// Number of entries
    pub count: usize,
    /// Arithmetic mean of the scores
    pub mean: f64,
    /// Lowest score
    pub min: f64,
    /// Highest score
    pub max: f64,
}

impl ScoreStats {
    /// Compute statistics; an empty batch yields all zeros
    pub fn from_entries(entries: &[Entry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let (sum, min, max) = entries.iter().map(Entry::score).fold(
            (0.0, f64::INFINITY, f64::NEG_INFINITY),
            |(sum, min, max), score| (sum + score, min.min(score), max.max(score)),
        );

        Self {
            count: entries.len(),
            mean: sum / entries.len() as f64,
            min,
            max,
        }
    }
}

#[derive(Debug, Default)]
struct HistogramState {
    stats: ScoreStats,
    discarded: usize,
}

/// Score statistics observer
pub struct Histogram {
    log: Arc<dyn LogSink>,
    state: Mutex<HistogramState>,
}

impl Histogram {
    /// Create an empty histogram
    pub fn new(log: Arc<dyn LogSink>) -> Self {
        Self {
            log,
            state: Mutex::new(HistogramState::default()),
        }
    }

    /// Mean score of the last accepted batch
    pub fn average(&self) -> f64 {
        self.stats().mean
    }

    /// Rejected entries seen since creation
    pub fn thrown(&self) -> usize {
        self.state
            .lock()
            .map(|state| state.discarded)
            .unwrap_or_default()
    }

    /// Statistics of the last accepted batch
    pub fn stats(&self) -> ScoreStats {
        self.state
            .lock()
            .map(|state| state.stats)
            .unwrap_or_default()
    }
}

impl DataObserver for Histogram {
    fn on_data_load(&self, _old_entries: &[Entry], new_entries: &[Entry]) {
        let stats = ScoreStats::from_entries(new_entries);
        let discarded = match self.state.lock() {
            Ok(mut state) => {
                state.stats = stats;
                state.discarded
            }
            Err(_) => return,
        };

        self.log.write(&format!(
            "Average: {:.6} Number of discarded: {}",
            stats.mean, discarded
        ));
    }

    fn on_raw_data_load(&self, _old_lines: &[String], _new_lines: &[String]) {}
}

impl BatchObserver for Histogram {
    fn on_loaded(&self, accepted: &[Entry]) {
        self.log
            .write_debug(&format!("Histogram::on_loaded: {} entries", accepted.len()));
    }

    fn skip(&self, _rejected: &Entry) {
        if let Ok(mut state) = self.state.lock() {
            state.discarded += 1;
        }
    }
}
