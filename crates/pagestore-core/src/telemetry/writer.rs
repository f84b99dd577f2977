//! Async telemetry writer
//!
//! Drains the channel fed by [`StatSender`](crate::observers::StatSender)
//! into a [`TelemetrySink`]. The writer stops once every sender is dropped,
//! then flushes the sink.

use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::traits::{TelemetryBatch, TelemetrySink};

/// Background consumer of telemetry batches
pub struct TelemetryWriter {
    sink: Box<dyn TelemetrySink>,
}

impl TelemetryWriter {
    /// Create a writer delivering to `sink`
    pub fn new(sink: Box<dyn TelemetrySink>) -> Self {
        Self { sink }
    }

    /// Deliver batches until the channel closes
    ///
    /// A failed delivery is logged and does not stop the writer.
    ///
    /// # Returns
    ///
    /// - `Ok(usize)`: Number of batches the sink accepted
    /// - `Err(Error)`: The final flush failed
    pub async fn run(&self, rx: mpsc::Receiver<TelemetryBatch>) -> Result<usize> {
        let mut batches = ReceiverStream::new(rx);
        let mut delivered = 0;

        while let Some(batch) = batches.next().await {
            match self.sink.send(&batch).await {
                Ok(()) => {
                    debug!("Delivered {} item(s) to {}", batch.items.len(), batch.path);
                    delivered += 1;
                }
                Err(e) => {
                    error!("Failed to deliver telemetry to {}: {}", batch.path, e);
                }
            }
        }

        self.sink.flush().await?;
        info!("Telemetry channel closed, {} batch(es) delivered", delivered);

        Ok(delivered)
    }
}
