// # Stat Sender Observer
//
// Ships filter outcomes as telemetry batches over a bounded channel drained
// by `TelemetryWriter`.
//
// ## Delivery
//
// - `Delivery::Drop`: `try_send`; a full channel drops the batch with a warning
// - `Delivery::Block`: `blocking_send`; the load waits for the writer. Only
//   usable off the async executor (e.g. inside `tokio::task::spawn_blocking`)

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;
use tracing::warn;

use crate::entry::Entry;
use crate::traits::telemetry_sink::{LOADED_PATH, SKIPPED_PATH};
use crate::traits::{BatchObserver, LogSink, TelemetryBatch};

/// How a batch is handed to a full channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Drop the batch and count it
    Drop,
    /// Wait for room; panics if called from an async context
    Block,
}

/// Telemetry shipping observer
pub struct StatSender {
    log: Arc<dyn LogSink>,
    tx: mpsc::Sender<TelemetryBatch>,
    delivery: Delivery,
    sent: AtomicUsize,
    dropped: AtomicUsize,
}

impl StatSender {
    /// Create a sender with a channel of `capacity` batches
    ///
    /// # Returns
    ///
    /// A tuple of (sender, receiver) where the receiver should be handed to a
    /// [`TelemetryWriter`](crate::telemetry::TelemetryWriter)
    pub fn new(log: Arc<dyn LogSink>, capacity: usize) -> (Self, mpsc::Receiver<TelemetryBatch>) {
        Self::with_delivery(log, capacity, Delivery::Drop)
    }

    /// Create a sender that waits for channel room instead of dropping
    ///
    /// The container must then run on a thread outside the async executor,
    /// such as a `spawn_blocking` task, while the writer drains the channel.
    pub fn blocking(
        log: Arc<dyn LogSink>,
        capacity: usize,
    ) -> (Self, mpsc::Receiver<TelemetryBatch>) {
        Self::with_delivery(log, capacity, Delivery::Block)
    }

    fn with_delivery(
        log: Arc<dyn LogSink>,
        capacity: usize,
        delivery: Delivery,
    ) -> (Self, mpsc::Receiver<TelemetryBatch>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));

        let sender = Self {
            log,
            tx,
            delivery,
            sent: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
        };

        (sender, rx)
    }

    /// Delivery mode chosen at creation
    pub fn delivery(&self) -> Delivery {
        self.delivery
    }

    /// Batches handed to the channel
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }

    /// Batches dropped because the channel was full or closed
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::SeqCst)
    }

    fn send(&self, items: &[Entry], path: &str) {
        self.log.write(path);
        self.log.write(&format!("send stat {}", items.len()));
        for item in items {
            self.log.write_debug(&format!("send: {}", item.id()));
        }

        let batch = TelemetryBatch::new(path, items.to_vec());
        let result = match self.delivery {
            Delivery::Drop => self.tx.try_send(batch).map_err(|e| e.to_string()),
            Delivery::Block => self.tx.blocking_send(batch).map_err(|e| e.to_string()),
        };

        match result {
            Ok(()) => {
                self.sent.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                warn!("Telemetry channel unavailable, dropping batch for {}: {}", path, e);
                self.dropped.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

impl BatchObserver for StatSender {
    fn on_loaded(&self, accepted: &[Entry]) {
        self.log.write_debug("StatSender::on_loaded");
        self.send(accepted, LOADED_PATH);
    }

    fn skip(&self, rejected: &Entry) {
        self.send(std::slice::from_ref(rejected), SKIPPED_PATH);
    }
}
