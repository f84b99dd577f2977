// # Telemetry Sink Trait
//
// Defines where shipped telemetry batches end up.
//
// ## Implementations
//
// - File-based: JSON lines appended to a local file
// - In-memory: for tests and embedding
//
// ## Usage
//
// ```rust,ignore
// use pagestore_core::telemetry::MemoryTelemetrySink;
// use pagestore_core::traits::{TelemetryBatch, TelemetrySink};
//
// #[tokio::main]
// async fn main() -> pagestore_core::Result<()> {
//     let sink = MemoryTelemetrySink::new();
//     sink.send(&TelemetryBatch::new("/items/loaded", vec![])).await?;
//     sink.flush().await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Path used for accepted batches
pub const LOADED_PATH: &str = "/items/loaded";

/// Path used for individual rejections
pub const SKIPPED_PATH: &str = "/items/skipped";

/// One unit of shipped telemetry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryBatch {
    /// Logical destination, e.g. `/items/loaded`
    pub path: String,
    /// Entries carried by this batch
    pub items: Vec<Entry>,
    /// When the batch was handed to the sender
    pub sent_at: chrono::DateTime<chrono::Utc>,
}

impl TelemetryBatch {
    /// Create a batch stamped with the current time
    pub fn new(path: impl Into<String>, items: Vec<Entry>) -> Self {
        Self {
            path: path.into(),
            items,
            sent_at: chrono::Utc::now(),
        }
    }
}

/// Trait for telemetry sink implementations
///
/// Sinks are driven by the async telemetry writer, never by the container
/// directly, so a slow sink cannot stall a load.
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks.
#[async_trait]
pub trait TelemetrySink: Send + Sync {
    /// Deliver one batch
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Batch accepted by the sink
    /// - `Err(Error)`: Delivery failed; the writer logs and moves on
    async fn send(&self, batch: &TelemetryBatch) -> Result<(), crate::Error>;

    /// Persist any buffered batches
    async fn flush(&self) -> Result<(), crate::Error>;
}
