//! Minimal embedding example for pagestore-core
//!
//! This example demonstrates using pagestore-core as a library in a custom
//! application: a custom observer, the built-in collaborators, and an
//! in-memory telemetry sink.

use pagestore_core::log::MemoryLog;
use pagestore_core::telemetry::{MemoryTelemetrySink, TelemetryWriter};
use pagestore_core::{
    BatchObserver, ContainerConfig, Entry, Histogram, LogSink, PageContainer, Result, StatSender,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts rejections per pass
struct RejectionCounter {
    current: AtomicUsize,
}

impl RejectionCounter {
    fn new() -> Self {
        Self {
            current: AtomicUsize::new(0),
        }
    }
}

impl BatchObserver for RejectionCounter {
    fn on_loaded(&self, accepted: &[Entry]) {
        let rejected = self.current.swap(0, Ordering::SeqCst);
        println!("pass done: {} accepted, {} rejected", accepted.len(), rejected);
    }

    fn skip(&self, _rejected: &Entry) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

fn records() -> String {
    (1..=20)
        .map(|n| format!("item{n} label{n} {}\n", n as f64 * 1.5))
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let log: Arc<dyn LogSink> = Arc::new(MemoryLog::new(true));
    let mut container = PageContainer::new(log.clone(), ContainerConfig::default())?;

    let counter = Arc::new(RejectionCounter::new());
    let histogram = Arc::new(Histogram::new(log.clone()));
    let sink = MemoryTelemetrySink::new();
    let (sender, rx) = StatSender::new(log.clone(), 128);
    let sender = Arc::new(sender);

    container.attach_batch(&counter);
    container.attach_batch(&sender);
    container.attach_data(&histogram);
    container.attach_batch(&histogram);

    let writer = TelemetryWriter::new(Box::new(sink.clone()));
    let writer_handle = tokio::spawn(async move { writer.run(rx).await });

    container.load(records().as_bytes(), 3.0)?;
    println!(
        "loaded {} entries, average {:.2}",
        container.len(),
        histogram.average()
    );

    for threshold in [0.0, 10.0, 20.0] {
        match container.reload(threshold) {
            Ok(()) => println!("threshold {}: {} entries", threshold, container.len()),
            Err(e) => println!("threshold {}: kept previous entries ({})", threshold, e),
        }
    }

    println!("first entry: {:?}", container.by_index(0)?);
    println!("lookup item20: {:?}", container.by_id("item20")?);

    drop(container);
    drop(sender);
    let delivered = writer_handle
        .await
        .map_err(|e| pagestore_core::Error::Other(e.to_string()))??;
    println!(
        "{} telemetry batch(es) delivered, {} rejected overall",
        delivered,
        histogram.thrown()
    );

    Ok(())
}
