//! Test doubles and common utilities for container contract tests
//!
//! Every recorder writes into a shared journal so a test can assert the
//! interleaving of notifications across contracts and across observers.

#![allow(dead_code)]

use pagestore_core::log::MemoryLog;
use pagestore_core::{
    BatchObserver, ContainerConfig, DataObserver, Entry, LogSink, PageContainer,
};
use std::sync::{Arc, Mutex};

/// One observed notification
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `on_raw_data_load` with old and new line counts
    RawDataLoad {
        observer: &'static str,
        old: usize,
        new: usize,
    },
    /// `on_data_load` with old and new ids
    DataLoad {
        observer: &'static str,
        old: Vec<String>,
        new: Vec<String>,
    },
    /// `skip` with the rejected id
    Skip { observer: &'static str, id: String },
    /// `on_loaded` with the accepted ids
    Loaded {
        observer: &'static str,
        ids: Vec<String>,
    },
}

/// Shared, ordered record of notifications
pub type Journal = Arc<Mutex<Vec<Event>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(journal: &Journal) -> Vec<Event> {
    journal.lock().unwrap().clone()
}

fn ids(entries: &[Entry]) -> Vec<String> {
    entries.iter().map(|entry| entry.id().to_string()).collect()
}

/// Observer implementing both contracts and journaling every call
pub struct RecordingObserver {
    name: &'static str,
    journal: Journal,
}

impl RecordingObserver {
    pub fn new(name: &'static str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name,
            journal: journal.clone(),
        })
    }

    fn push(&self, event: Event) {
        self.journal.lock().unwrap().push(event);
    }
}

impl DataObserver for RecordingObserver {
    fn on_data_load(&self, old_entries: &[Entry], new_entries: &[Entry]) {
        self.push(Event::DataLoad {
            observer: self.name,
            old: ids(old_entries),
            new: ids(new_entries),
        });
    }

    fn on_raw_data_load(&self, old_lines: &[String], new_lines: &[String]) {
        self.push(Event::RawDataLoad {
            observer: self.name,
            old: old_lines.len(),
            new: new_lines.len(),
        });
    }
}

impl BatchObserver for RecordingObserver {
    fn on_loaded(&self, accepted: &[Entry]) {
        self.push(Event::Loaded {
            observer: self.name,
            ids: ids(accepted),
        });
    }

    fn skip(&self, rejected: &Entry) {
        self.push(Event::Skip {
            observer: self.name,
            id: rejected.id().to_string(),
        });
    }
}

/// Lines `id{n} name{n} {n}.0` for each `n`
pub fn numbered_lines(range: impl IntoIterator<Item = usize>) -> Vec<String> {
    range
        .into_iter()
        .map(|n| format!("id{n} name{n} {n}.0"))
        .collect()
}

/// Join lines into a newline-terminated source
pub fn source(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

/// Container with a quiet memory log and the given configuration
pub fn container_with(config: ContainerConfig) -> PageContainer {
    let log: Arc<dyn LogSink> = Arc::new(MemoryLog::new(false));
    PageContainer::new(log, config).expect("valid container config")
}

/// Container with the default configuration
pub fn container() -> PageContainer {
    container_with(ContainerConfig::default())
}

/// Owned snapshot of the container state for before/after comparison
pub fn snapshot(container: &PageContainer) -> (Vec<String>, Vec<Entry>) {
    (container.raw_lines().to_vec(), container.entries().to_vec())
}

pub fn skipped_ids(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Skip { id, .. } => Some(id.clone()),
            _ => None,
        })
        .collect()
}
