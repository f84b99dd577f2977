//! Contract Test: Telemetry Pipeline
//!
//! Drives a container with the built-in collaborators attached and checks
//! that telemetry reaches the sink in notification order.

mod common;

use common::*;
use pagestore_core::log::MemoryLog;
use pagestore_core::telemetry::{MemoryTelemetrySink, TelemetryWriter};
use pagestore_core::{Histogram, LogSink, StatSender, UsedMemory};
use std::sync::Arc;

#[tokio::test]
async fn collaborators_observe_a_load() {
    let log = Arc::new(MemoryLog::new(true));
    let shared: Arc<dyn LogSink> = log.clone();

    let sink = MemoryTelemetrySink::new();
    let writer = TelemetryWriter::new(Box::new(sink.clone()));
    let (sender, rx) = StatSender::new(shared.clone(), 64);
    let sender = Arc::new(sender);
    let memory = Arc::new(UsedMemory::new(shared.clone()));
    let histogram = Arc::new(Histogram::new(shared.clone()));

    let writer_handle = tokio::spawn(async move { writer.run(rx).await });

    {
        let mut container = container();
        container.attach_data(&memory);
        container.attach_data(&histogram);
        container.attach_batch(&sender);
        container.attach_batch(&histogram);

        container
            .load(source(&numbered_lines(1..=12)).as_bytes(), 2.0)
            .unwrap();

        assert!(memory.used() > 0);
        assert_eq!(histogram.thrown(), 2);
        assert_eq!(histogram.average(), 7.5);
        assert_eq!(sender.sent(), 3);
    }

    // Dropping the last sender closes the channel and stops the writer
    drop(sender);
    let delivered = writer_handle.await.unwrap().unwrap();
    assert_eq!(delivered, 3);

    let batches = sink.batches().await;
    let paths: Vec<&str> = batches.iter().map(|b| b.path.as_str()).collect();
    assert_eq!(paths, vec!["/items/skipped", "/items/skipped", "/items/loaded"]);
    assert_eq!(batches[0].items[0].id(), "id1");
    assert_eq!(batches[2].items.len(), 10);

    assert!(log.contains("Average: 7.500000 Number of discarded: 2"));
    assert!(log.contains("send stat 10"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_delivery_keeps_every_batch_beyond_capacity() {
    let shared: Arc<dyn LogSink> = Arc::new(MemoryLog::new(false));

    let sink = MemoryTelemetrySink::new();
    let writer = TelemetryWriter::new(Box::new(sink.clone()));
    let (sender, rx) = StatSender::blocking(shared, 8);
    let sender = Arc::new(sender);

    let writer_handle = tokio::spawn(async move { writer.run(rx).await });

    // 1200 rejections and one accepted batch against a channel of 8
    let loader = sender.clone();
    let container = tokio::task::spawn_blocking(move || {
        let mut container = container();
        container.attach_batch(&loader);
        container
            .load(source(&numbered_lines(1..=1500)).as_bytes(), 1200.0)
            .map(|()| container)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(container.len(), 300);
    assert_eq!(sender.sent(), 1201);
    assert_eq!(sender.dropped(), 0);

    drop(container);
    drop(sender);
    let delivered = writer_handle.await.unwrap().unwrap();
    assert_eq!(delivered, 1201);

    let batches = sink.batches().await;
    assert_eq!(batches.first().map(|b| b.items[0].id()), Some("id1"));
    assert_eq!(batches.last().map(|b| b.path.as_str()), Some("/items/loaded"));
}
