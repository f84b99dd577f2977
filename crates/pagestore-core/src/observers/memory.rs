// # Used Memory Observer
//
// Tracks how many bytes the container's collections hold, counting string
// capacity rather than length.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::entry::Entry;
use crate::traits::{DataObserver, LogSink};

/// Running byte estimate for raw lines and entries
pub struct UsedMemory {
    log: Arc<dyn LogSink>,
    used: AtomicUsize,
}

impl UsedMemory {
    /// Create an accountant starting at zero
    pub fn new(log: Arc<dyn LogSink>) -> Self {
        Self {
            log,
            used: AtomicUsize::new(0),
        }
    }

    /// Current estimate in bytes
    pub fn used(&self) -> usize {
        self.used.load(Ordering::SeqCst)
    }

    /// Reset the estimate to zero
    pub fn clear(&self) {
        self.used.store(0, Ordering::SeqCst);
    }

    fn replace(&self, released: usize, acquired: usize) -> usize {
        let previous = self
            .used
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |used| {
                Some(used.saturating_sub(released) + acquired)
            })
            .unwrap_or_default();
        previous.saturating_sub(released) + acquired
    }
}

impl DataObserver for UsedMemory {
    fn on_data_load(&self, old_entries: &[Entry], new_entries: &[Entry]) {
        self.log.write_debug("UsedMemory::on_data_load");

        let released = old_entries.iter().map(Entry::footprint).sum();
        let acquired = new_entries.iter().map(Entry::footprint).sum();
        let used = self.replace(released, acquired);

        self.log
            .write(&format!("UsedMemory::on_data_load: new size = {}", used));
    }

    fn on_raw_data_load(&self, old_lines: &[String], new_lines: &[String]) {
        self.log.write_debug("UsedMemory::on_raw_data_load");

        let released = old_lines.iter().map(String::capacity).sum();
        let acquired = new_lines.iter().map(String::capacity).sum();
        let used = self.replace(released, acquired);

        self.log
            .write(&format!("UsedMemory::on_raw_data_load: new size = {}", used));
    }
}
