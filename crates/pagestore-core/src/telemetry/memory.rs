// # Memory Telemetry Sink
//
// Keeps every delivered batch in memory. Nothing survives a restart.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::traits::telemetry_sink::{TelemetryBatch, TelemetrySink};
use crate::Error;

/// In-memory telemetry sink
///
/// Cloning shares the underlying storage, so a test can keep one handle while
/// the writer owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryTelemetrySink {
    inner: Arc<RwLock<Vec<TelemetryBatch>>>,
}

impl MemoryTelemetrySink {
    /// Create a new empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches delivered so far, in delivery order
    pub async fn batches(&self) -> Vec<TelemetryBatch> {
        self.inner.read().await.clone()
    }

    /// Number of delivered batches
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if nothing was delivered
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl TelemetrySink for MemoryTelemetrySink {
    async fn send(&self, batch: &TelemetryBatch) -> Result<(), Error> {
        self.inner.write().await.push(batch.clone());
        Ok(())
    }

    async fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;

    #[test]
    fn test_memory_sink_keeps_order() {
        tokio_test::block_on(async {
            let sink = MemoryTelemetrySink::new();
            assert!(sink.is_empty().await);

            sink.send(&TelemetryBatch::new("/items/skipped", vec![Entry::new("a", "x", 1.0)]))
                .await
                .unwrap();
            sink.send(&TelemetryBatch::new("/items/loaded", vec![]))
                .await
                .unwrap();

            let paths: Vec<String> = sink.batches().await.into_iter().map(|b| b.path).collect();
            assert_eq!(paths, vec!["/items/skipped", "/items/loaded"]);
            assert_eq!(sink.len().await, 2);
        });
    }
}
