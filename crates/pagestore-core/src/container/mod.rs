//! Core record container
//!
//! The PageContainer is responsible for:
//! - Ingesting line-oriented sources into raw lines
//! - Parsing and threshold-filtering raw lines into entries
//! - Rejecting duplicate ids
//! - Notifying data and batch observers about every replacement
//!
//! ## Architecture
//!
//! ```text
//!  BufRead source
//!        │
//!        ▼
//! ┌───────────────┐  on_raw_data_load  ┌────────────────┐
//! │ PageContainer │ ─────────────────▶ │ DataObserver   │
//! │               │  on_data_load      │ (UsedMemory,   │
//! │  raw_lines    │ ─────────────────▶ │  Histogram)    │
//! │  entries      │                    └────────────────┘
//! │               │  skip, on_loaded   ┌────────────────┐
//! │               │ ─────────────────▶ │ BatchObserver  │
//! └───────────────┘                    │ (StatSender)   │
//!                                      └────────────────┘
//! ```
//!
//! ## Load Flow
//!
//! 1. Read every line of the source
//! 2. Reject sources shorter than `min_raw_lines`
//! 3. Notify `on_raw_data_load`, commit raw lines
//! 4. Parse and filter, firing `skip` per rejected line
//! 5. Notify `on_data_load`, then `on_loaded`, commit entries
//!
//! Under [`IngestPolicy::Transactional`] step 4 runs before step 3, so a
//! failed parse leaves both collections untouched.

mod parse;

use std::io::BufRead;
use std::sync::{Arc, Weak};

use crate::config::{ContainerConfig, IngestPolicy};
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::registry::ObserverRegistry;
use crate::traits::{BatchObserver, DataObserver, LogSink};

use parse::parse_and_filter;

/// Subject owning raw lines and parsed entries
///
/// ## Lifecycle
///
/// 1. Create with [`PageContainer::new()`]
/// 2. Attach observers
/// 3. [`load`](PageContainer::load) a source, then
///    [`reload`](PageContainer::reload) with other thresholds as needed
///
/// ## Threading
///
/// All operations are synchronous and run observers inline. Callers sharing
/// a container across threads must serialize `load`/`reload` themselves.
pub struct PageContainer {
    /// Sink for diagnostic lines
    log: Arc<dyn LogSink>,

    /// Size limits and ingest policy
    config: ContainerConfig,

    /// Observers of collection replacement
    data_observers: ObserverRegistry<dyn DataObserver>,

    /// Observers of filter outcomes
    batch_observers: ObserverRegistry<dyn BatchObserver>,

    /// Entries as of the last successful parse
    entries: Vec<Entry>,

    /// Lines as of the last accepted ingest
    raw_lines: Vec<String>,
}

impl PageContainer {
    /// Create a new empty container
    ///
    /// # Parameters
    ///
    /// - `log`: Logging sink shared with collaborators
    /// - `config`: Container configuration
    ///
    /// # Returns
    ///
    /// - `Ok(PageContainer)`: Empty container
    /// - `Err(Error::Config)`: Invalid configuration
    pub fn new(log: Arc<dyn LogSink>, config: ContainerConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self::empty(log, config))
    }

    /// Create a container with the default configuration
    pub fn with_defaults(log: Arc<dyn LogSink>) -> Self {
        Self::empty(log, ContainerConfig::default())
    }

    fn empty(log: Arc<dyn LogSink>, config: ContainerConfig) -> Self {
        Self {
            log,
            config,
            data_observers: ObserverRegistry::new(),
            batch_observers: ObserverRegistry::new(),
            entries: Vec::new(),
            raw_lines: Vec::new(),
        }
    }

    /// Ingest a line-oriented source and filter it at `threshold`
    ///
    /// # Errors
    ///
    /// - `Io`: The source could not be read; nothing changed
    /// - `InputTooSmall`: Fewer than `min_raw_lines` lines; nothing changed
    ///   and no observer was notified
    /// - `InvalidRecord`, `DuplicateId`, `InsufficientAccepted`: Entries are
    ///   unchanged. Under the default ingest policy the raw lines already
    ///   hold the new source.
    pub fn load<R: BufRead>(&mut self, source: R, threshold: f64) -> Result<()> {
        self.log
            .write_debug(&format!("PageContainer::load threshold={}", threshold));

        let candidate = source.lines().collect::<std::io::Result<Vec<String>>>()?;

        if candidate.len() < self.config.min_raw_lines {
            self.log.write(&format!(
                "PageContainer::load: input too small ({} lines)",
                candidate.len()
            ));
            return Err(Error::InputTooSmall {
                lines: candidate.len(),
                min: self.config.min_raw_lines,
            });
        }

        match self.config.ingest {
            IngestPolicy::CommitRawFirst => {
                self.commit_raw_lines(candidate);
                let entries = parse_and_filter(
                    &self.raw_lines,
                    threshold,
                    self.config.min_accepted,
                    &mut self.batch_observers,
                    self.log.as_ref(),
                )?;
                self.commit_entries(entries);
            }
            IngestPolicy::Transactional => {
                let entries = parse_and_filter(
                    &candidate,
                    threshold,
                    self.config.min_accepted,
                    &mut self.batch_observers,
                    self.log.as_ref(),
                )?;
                self.commit_raw_lines(candidate);
                self.commit_entries(entries);
            }
        }

        Ok(())
    }

    /// Re-filter the current raw lines at a new `threshold`
    ///
    /// Raw lines are never touched. Errors leave the entries unchanged.
    pub fn reload(&mut self, threshold: f64) -> Result<()> {
        self.log
            .write_debug(&format!("PageContainer::reload threshold={}", threshold));

        let entries = parse_and_filter(
            &self.raw_lines,
            threshold,
            self.config.min_accepted,
            &mut self.batch_observers,
            self.log.as_ref(),
        )?;
        self.commit_entries(entries);

        Ok(())
    }

    /// Entry at position `index`
    pub fn by_index(&self, index: usize) -> Result<&Entry> {
        self.entries.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Entry with the given id
    pub fn by_id(&self, id: &str) -> Result<&Entry> {
        self.entries
            .iter()
            .find(|entry| entry.id() == id)
            .ok_or_else(|| Error::not_found(id))
    }

    /// Accepted entries as of the last successful parse
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Raw lines as of the last accepted ingest
    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    /// Number of accepted entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active configuration
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Register a data observer
    ///
    /// The container keeps a non-owning reference; the caller keeps the
    /// observer alive. Attaching an observer twice has no effect.
    pub fn attach_data<O: DataObserver + 'static>(&mut self, observer: &Arc<O>) -> bool {
        let weak = Arc::downgrade(observer) as Weak<dyn DataObserver>;
        self.data_observers.attach(weak)
    }

    /// Remove a data observer; unknown observers are ignored
    pub fn detach_data<O: DataObserver + 'static>(&mut self, observer: &Arc<O>) -> bool {
        let weak = Arc::downgrade(observer) as Weak<dyn DataObserver>;
        self.data_observers.detach(&weak)
    }

    /// Register a batch observer
    ///
    /// Same ownership rules as [`attach_data`](PageContainer::attach_data).
    pub fn attach_batch<O: BatchObserver + 'static>(&mut self, observer: &Arc<O>) -> bool {
        let weak = Arc::downgrade(observer) as Weak<dyn BatchObserver>;
        self.batch_observers.attach(weak)
    }

    /// Remove a batch observer; unknown observers are ignored
    pub fn detach_batch<O: BatchObserver + 'static>(&mut self, observer: &Arc<O>) -> bool {
        let weak = Arc::downgrade(observer) as Weak<dyn BatchObserver>;
        self.batch_observers.detach(&weak)
    }

    /// Number of live data observers
    pub fn data_observer_count(&self) -> usize {
        self.data_observers.len()
    }

    /// Number of live batch observers
    pub fn batch_observer_count(&self) -> usize {
        self.batch_observers.len()
    }

    /// Notify data observers, then replace the raw lines
    fn commit_raw_lines(&mut self, lines: Vec<String>) {
        self.data_observers
            .notify(|observer| observer.on_raw_data_load(&self.raw_lines, &lines));
        self.raw_lines = lines;
    }

    /// Notify data observers, then batch observers, then replace the entries
    fn commit_entries(&mut self, entries: Vec<Entry>) {
        self.data_observers
            .notify(|observer| observer.on_data_load(&self.entries, &entries));
        self.batch_observers
            .notify(|observer| observer.on_loaded(&entries));
        self.log.write_debug(&format!(
            "PageContainer: committed {} entries",
            entries.len()
        ));
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MemoryLog;

    fn source(count: usize) -> String {
        (1..=count)
            .map(|n| format!("id{n} name{n} {n}.0\n"))
            .collect()
    }

    fn container() -> PageContainer {
        PageContainer::with_defaults(Arc::new(MemoryLog::new(true)))
    }

    #[test]
    fn test_new_container_is_empty() {
        let container = container();
        assert!(container.is_empty());
        assert!(container.raw_lines().is_empty());
        assert!(matches!(
            container.by_index(0),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_constructors_agree_on_defaults() {
        let log: Arc<dyn LogSink> = Arc::new(MemoryLog::new(false));
        let from_new = PageContainer::new(log.clone(), ContainerConfig::default()).unwrap();
        let from_defaults = PageContainer::with_defaults(log);

        for container in [&from_new, &from_defaults] {
            assert!(container.is_empty());
            assert!(container.raw_lines().is_empty());
            assert_eq!(container.data_observer_count(), 0);
            assert_eq!(container.batch_observer_count(), 0);
            assert_eq!(container.config().min_raw_lines, 10);
            assert_eq!(container.config().min_accepted, 10);
            assert_eq!(container.config().ingest, IngestPolicy::CommitRawFirst);
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let log: Arc<dyn LogSink> = Arc::new(MemoryLog::new(false));
        let result = PageContainer::new(log, ContainerConfig::default().with_min_accepted(0));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_and_lookup() {
        let mut container = container();
        container.load(source(20).as_bytes(), 10.0).unwrap();

        assert_eq!(container.len(), 10);
        assert_eq!(container.raw_lines().len(), 20);
        assert_eq!(container.by_index(0).unwrap().id(), "id11");
        assert_eq!(container.by_id("id20").unwrap().score(), 20.0);
        assert!(matches!(container.by_id("id3"), Err(Error::NotFound(_))));
        assert!(matches!(
            container.by_index(10),
            Err(Error::IndexOutOfRange { index: 10, len: 10 })
        ));
    }

    #[test]
    fn test_reload_without_load_fails() {
        let mut container = container();
        assert!(matches!(
            container.reload(0.0),
            Err(Error::InsufficientAccepted { accepted: 0, min: 10 })
        ));
    }

    #[test]
    fn test_load_handles_crlf_input() {
        let mut container = container();
        let input = source(12).replace('\n', "\r\n");
        container.load(input.as_bytes(), 0.0).unwrap();
        assert_eq!(container.len(), 12);
        assert_eq!(container.by_index(11).unwrap().score(), 12.0);
    }
}
