// # Telemetry
//
// Sink implementations and the async writer that drains batches produced by
// the `StatSender` observer.
//
// ```text
// PageContainer ── skip/on_loaded ──▶ StatSender ── try_send ──▶ mpsc
//                                                                 │
//                                       TelemetryWriter ◀─────────┘
//                                              │
//                                              ▼
//                                        TelemetrySink
// ```

pub mod file;
pub mod memory;
pub mod writer;

pub use file::FileTelemetrySink;
pub use memory::MemoryTelemetrySink;
pub use writer::TelemetryWriter;

use crate::config::TelemetrySinkConfig;
use crate::traits::TelemetrySink;
use crate::Error;

/// Create a sink from configuration
///
/// # Returns
///
/// - `Ok(Some(sink))`: Sink ready to receive batches
/// - `Ok(None)`: Telemetry is disabled
/// - `Err(Error)`: The sink could not be opened
pub async fn create_sink(
    config: &TelemetrySinkConfig,
) -> Result<Option<Box<dyn TelemetrySink>>, Error> {
    match config {
        TelemetrySinkConfig::File { path } => {
            let sink = FileTelemetrySink::new(path).await?;
            Ok(Some(Box::new(sink)))
        }
        TelemetrySinkConfig::Memory => Ok(Some(Box::new(MemoryTelemetrySink::new()))),
        TelemetrySinkConfig::Disabled => Ok(None),
    }
}
